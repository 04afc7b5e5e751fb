//! # ccsl-metrics
//!
//! Transcript-derived session metrics for the ccsl status line.
//!
//! This crate provides:
//! - [`load_transcript`] - Tolerant loader for newline-delimited JSON transcripts
//! - [`token_totals`] - Session-wide token accounting
//! - [`CostAttributor`] - Per-entry, model-aware cost attribution
//! - [`analyze`] - Cache/latency/duration performance metrics
//! - [`classify`] - Threshold-ladder badge classification
//!
//! Every component degrades to a well-defined default instead of failing: a
//! status line must always render something.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use ccsl_metrics::{load_transcript, SessionMetrics};
//!
//! let entries = load_transcript(Some(Path::new("~/.claude/session.jsonl")));
//! if let Some(metrics) = SessionMetrics::compute(&entries) {
//!     println!("session cost: ${:.4}", metrics.cost.total_usd);
//! }
//! ```

pub mod badge;
pub mod cost;
pub mod perf;
pub mod pricing;
pub mod transcript;
pub mod usage;

pub use badge::{classify, BadgeLevel, ThresholdLadder};
pub use cost::{CostAttributor, CostReport};
pub use perf::{analyze, PerfMetrics};
pub use pricing::{pricing_table, ModelPricing};
pub use transcript::{load_transcript, resolve_model_id, TokenUsage, TranscriptEntry};
pub use usage::{token_totals, TokenTotals};

/// All metrics derived from one transcript.
///
/// Bundles the three independent aggregation passes over the same entry
/// sequence. Rebuilt from scratch on every invocation; nothing is persisted.
#[derive(Debug, Clone)]
pub struct SessionMetrics {
    pub tokens: TokenTotals,
    pub context_size: u64,
    pub cost: CostReport,
    pub perf: PerfMetrics,
}

impl SessionMetrics {
    /// Run the full derivation pipeline over a transcript.
    ///
    /// Returns `None` for an empty transcript: with no history there is no
    /// data for any metric, and downstream rendering skips the corresponding
    /// fields instead of showing placeholders.
    pub fn compute(entries: &[TranscriptEntry]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }

        let tokens = token_totals(entries);
        let cost = CostAttributor::new().attribute(entries);
        let perf = analyze(entries, &tokens);

        Some(Self {
            context_size: tokens.context_size(),
            tokens,
            cost,
            perf,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_transcript_has_no_metrics() {
        assert!(SessionMetrics::compute(&[]).is_none());
    }

    #[test]
    fn test_compute_fans_out() {
        let entries: Vec<TranscriptEntry> = [
            r#"{"type":"user","timestamp":"2025-01-15T10:00:00Z"}"#,
            r#"{"type":"assistant","timestamp":"2025-01-15T10:00:05Z",
                "message":{"model":"claude-sonnet-4-20250514",
                "usage":{"input_tokens":1000,"output_tokens":500}}}"#,
        ]
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

        let metrics = SessionMetrics::compute(&entries).unwrap();
        assert_eq!(metrics.tokens.input_tokens, 1000);
        assert_eq!(metrics.context_size, 1500);
        assert!((metrics.cost.total_usd - 0.0105).abs() < 1e-9);
        assert!((metrics.perf.avg_response_secs - 5.0).abs() < 1e-9);
        assert_eq!(metrics.perf.message_count, 1);
    }
}
