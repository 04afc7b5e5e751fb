//! Per-entry, model-aware cost attribution.
//!
//! A session may span multiple model versions with different rates, so cost
//! is attributed per entry to the model that actually served it rather than
//! applying one model's rate to the whole session.
//!
//! Tool-result entries carry usage but no model of their own; their model is
//! resolved by following `parentUuid` back to the assistant message that
//! invoked the tool, falling back to the most recently seen model when the
//! parent is absent or dangling.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, trace};

use crate::pricing::{pricing_table, ModelPricing};
use crate::transcript::{TokenUsage, TranscriptEntry};

/// Total session cost plus a per-model breakdown for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct CostReport {
    /// Total cost in USD across the whole transcript
    pub total_usd: f64,

    /// Cost per model identifier
    pub by_model: HashMap<String, f64>,
}

/// Attributes cost to transcript entries using the embedded pricing table.
pub struct CostAttributor {
    pricing: HashMap<&'static str, ModelPricing>,
}

impl CostAttributor {
    /// Create an attributor with the embedded pricing table.
    pub fn new() -> Self {
        Self {
            pricing: pricing_table(),
        }
    }

    /// Compute the session cost from an ordered entry sequence.
    pub fn attribute(&self, entries: &[TranscriptEntry]) -> CostReport {
        // uuid -> entry lookup for parent resolution. Duplicate uuids are a
        // data-quality gap in the transcript; last write wins.
        let mut lookup: HashMap<&str, &TranscriptEntry> = HashMap::new();
        for entry in entries {
            if let Some(uuid) = entry.uuid.as_deref() {
                lookup.insert(uuid, entry);
            }
        }

        let mut report = CostReport::default();
        let mut last_model_id: Option<String> = None;

        for entry in entries {
            let mut usage: Option<TokenUsage> = None;
            let mut model_id: Option<String> = None;

            if entry.is_assistant() && entry.message.is_some() {
                usage = entry.usage();
                model_id = entry.model_id();
                if let Some(id) = &model_id {
                    last_model_id = Some(id.clone());
                }
            } else if entry.tool_use_result.as_ref().is_some_and(Value::is_object) {
                usage = entry.usage();
                model_id = entry
                    .parent_uuid
                    .as_deref()
                    .and_then(|uuid| lookup.get(uuid))
                    .and_then(|parent| parent_model(parent));

                if model_id.is_none() {
                    model_id = last_model_id.clone();
                }
            }

            match (usage, model_id) {
                // All-zero usage carries no cost; keep it out of the
                // per-model breakdown entirely.
                (Some(usage), Some(model_id)) if usage != TokenUsage::default() => {
                    let cost = self.entry_cost(&usage, &model_id);
                    report.total_usd += cost;
                    *report.by_model.entry(model_id).or_insert(0.0) += cost;
                }
                (Some(_), None) => {
                    debug!(
                        uuid = entry.uuid.as_deref().unwrap_or("unknown"),
                        "entry has usage but no resolvable model"
                    );
                }
                _ => {}
            }
        }

        report
    }

    /// Cost of one entry's usage at the given model's rates.
    ///
    /// Unknown or deprecated models contribute zero rather than failing the
    /// run. Cache writes are charged at the 5-minute rate.
    fn entry_cost(&self, usage: &TokenUsage, model_id: &str) -> f64 {
        let Some(pricing) = self.pricing.get(model_id) else {
            trace!(model = model_id, "model not in pricing table, zero cost");
            return 0.0;
        };

        (usage.input_tokens as f64 * pricing.input
            + usage.cache_creation_input_tokens as f64 * pricing.cache_write_5m
            + usage.cache_read_input_tokens as f64 * pricing.cache_read
            + usage.output_tokens as f64 * pricing.output)
            / 1_000_000.0
    }
}

impl Default for CostAttributor {
    fn default() -> Self {
        Self::new()
    }
}

fn parent_model(parent: &TranscriptEntry) -> Option<String> {
    if parent.is_assistant() {
        parent.model_id()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> TranscriptEntry {
        serde_json::from_str(line).unwrap()
    }

    fn assistant(model: &str, input: u64, output: u64) -> TranscriptEntry {
        parse(&format!(
            r#"{{"type":"assistant","message":{{"model":"{model}",
                "usage":{{"input_tokens":{input},"output_tokens":{output}}}}}}}"#,
        ))
    }

    #[test]
    fn test_two_sonnet_entries() {
        // 2 x (1000 * 3.00 + 500 * 15.00) / 1e6 = 0.021
        let entries = vec![
            assistant("claude-sonnet-4-20250514", 1000, 500),
            assistant("claude-sonnet-4-20250514", 1000, 500),
        ];

        let report = CostAttributor::new().attribute(&entries);
        assert!((report.total_usd - 0.021).abs() < 1e-9);
        assert_eq!(report.by_model.len(), 1);
        assert!((report.by_model["claude-sonnet-4-20250514"] - 0.021).abs() < 1e-9);
    }

    #[test]
    fn test_empty_usage_costs_nothing() {
        let entries = vec![parse(
            r#"{"type":"assistant","message":{"model":"claude-opus-4-20250514","usage":{}}}"#,
        )];

        let report = CostAttributor::new().attribute(&entries);
        assert_eq!(report.total_usd, 0.0);
        // No tokens, no bucket: the breakdown only lists models that served
        // actual usage.
        assert!(report.by_model.is_empty());
    }

    #[test]
    fn test_unknown_model_costs_nothing() {
        let entries = vec![assistant("claude-9-experimental", 1_000_000, 1_000_000)];

        let report = CostAttributor::new().attribute(&entries);
        assert_eq!(report.total_usd, 0.0);
        // The model still shows up in the breakdown with a zero bucket
        assert_eq!(report.by_model["claude-9-experimental"], 0.0);
    }

    #[test]
    fn test_cache_tokens_use_their_own_rates() {
        // Sonnet 4: cache_write_5m 3.75, cache_read 0.30
        let entries = vec![parse(
            r#"{"type":"assistant","message":{"model":"claude-sonnet-4-20250514",
                "usage":{"cache_creation_input_tokens":1000000,"cache_read_input_tokens":1000000}}}"#,
        )];

        let report = CostAttributor::new().attribute(&entries);
        assert!((report.total_usd - (3.75 + 0.30)).abs() < 1e-9);
    }

    #[test]
    fn test_tool_result_resolves_parent_model() {
        // The tool result's parent uses Opus while the last seen model is
        // Sonnet: the parent chain must win.
        let entries = vec![
            parse(
                r#"{"type":"assistant","uuid":"a1","message":{"model":"claude-opus-4-20250514","usage":{}}}"#,
            ),
            assistant("claude-sonnet-4-20250514", 10, 10),
            parse(
                r#"{"type":"user","parentUuid":"a1",
                    "toolUseResult":{"usage":{"output_tokens":1000000}}}"#,
            ),
        ];

        let report = CostAttributor::new().attribute(&entries);
        // Opus output rate is 75.00/M, Sonnet's is 15.00/M
        assert!((report.by_model["claude-opus-4-20250514"] - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_tool_result_falls_back_to_last_seen_model() {
        let entries = vec![
            assistant("claude-sonnet-4-20250514", 0, 0),
            parse(
                r#"{"type":"user","parentUuid":"dangling",
                    "toolUseResult":{"usage":{"output_tokens":1000000}}}"#,
            ),
        ];

        let report = CostAttributor::new().attribute(&entries);
        assert!((report.by_model["claude-sonnet-4-20250514"] - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_usage_without_any_model_is_skipped() {
        let entries = vec![parse(
            r#"{"type":"user","toolUseResult":{"usage":{"output_tokens":1000000}}}"#,
        )];

        let report = CostAttributor::new().attribute(&entries);
        assert_eq!(report.total_usd, 0.0);
        assert!(report.by_model.is_empty());
    }

    #[test]
    fn test_model_as_object_in_parent() {
        let entries = vec![
            parse(
                r#"{"type":"assistant","uuid":"a1","message":{
                    "model":{"id":"claude-3-5-haiku-20241022"},"usage":{}}}"#,
            ),
            parse(
                r#"{"type":"user","parentUuid":"a1",
                    "toolUseResult":{"usage":{"output_tokens":1000000}}}"#,
            ),
        ];

        let report = CostAttributor::new().attribute(&entries);
        // Haiku 3.5 output rate is 4.00/M
        assert!((report.by_model["claude-3-5-haiku-20241022"] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_uuid_last_write_wins() {
        let entries = vec![
            parse(
                r#"{"type":"assistant","uuid":"dup","message":{"model":"claude-sonnet-4-20250514","usage":{}}}"#,
            ),
            parse(
                r#"{"type":"assistant","uuid":"dup","message":{"model":"claude-opus-4-20250514","usage":{}}}"#,
            ),
            parse(
                r#"{"type":"user","parentUuid":"dup",
                    "toolUseResult":{"usage":{"output_tokens":1000000}}}"#,
            ),
        ];

        let report = CostAttributor::new().attribute(&entries);
        assert!(report.by_model.contains_key("claude-opus-4-20250514"));
    }

    #[test]
    fn test_cost_monotonic_in_counters() {
        let base = CostAttributor::new()
            .attribute(&[assistant("claude-sonnet-4-20250514", 1000, 500)])
            .total_usd;
        let more_input = CostAttributor::new()
            .attribute(&[assistant("claude-sonnet-4-20250514", 2000, 500)])
            .total_usd;
        let more_output = CostAttributor::new()
            .attribute(&[assistant("claude-sonnet-4-20250514", 1000, 600)])
            .total_usd;

        assert!(more_input > base);
        assert!(more_output > base);
    }
}
