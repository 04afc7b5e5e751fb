//! Model pricing table.
//!
//! Rates are embedded from <https://docs.anthropic.com/en/docs/about-claude/pricing>,
//! all in USD per million tokens. The table is keyed by the full model
//! identifier as it appears in transcript entries; adding a new model is a
//! single new entry, no structural change.

use std::collections::HashMap;

/// Per-model rates in USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    /// Human-readable model name (e.g. "Claude Sonnet 4")
    pub name: &'static str,

    /// Rate for fresh input tokens
    pub input: f64,

    /// Rate for 5-minute cache writes (the Claude Code default)
    pub cache_write_5m: f64,

    /// Rate for 1-hour cache writes
    pub cache_write_1h: f64,

    /// Rate for cache reads
    pub cache_read: f64,

    /// Rate for output tokens
    pub output: f64,
}

impl ModelPricing {
    const fn new(
        name: &'static str,
        input: f64,
        cache_write_5m: f64,
        cache_write_1h: f64,
        cache_read: f64,
        output: f64,
    ) -> Self {
        Self {
            name,
            input,
            cache_write_5m,
            cache_write_1h,
            cache_read,
            output,
        }
    }
}

/// Build the embedded pricing table.
///
/// Callers should build this once and hold onto it; the table is immutable
/// after construction.
pub fn pricing_table() -> HashMap<&'static str, ModelPricing> {
    let mut table = HashMap::new();

    table.insert(
        "claude-opus-4-1-20250805",
        ModelPricing::new("Claude Opus 4.1", 15.00, 18.75, 30.00, 1.50, 75.00),
    );
    table.insert(
        "claude-opus-4-20250514",
        ModelPricing::new("Claude Opus 4", 15.00, 18.75, 30.00, 1.50, 75.00),
    );
    table.insert(
        "claude-sonnet-4-20250514",
        ModelPricing::new("Claude Sonnet 4", 3.00, 3.75, 6.00, 0.30, 15.00),
    );
    table.insert(
        "claude-3-7-sonnet-20250219",
        ModelPricing::new("Claude Sonnet 3.7", 3.00, 3.75, 6.00, 0.30, 15.00),
    );
    table.insert(
        "claude-3-5-sonnet-20241022",
        ModelPricing::new("Claude Sonnet 3.5", 3.00, 3.75, 6.00, 0.30, 15.00),
    );
    table.insert(
        "claude-3-5-sonnet-20240620",
        ModelPricing::new("Claude Sonnet 3.5", 3.00, 3.75, 6.00, 0.30, 15.00),
    );
    table.insert(
        "claude-3-5-haiku-20241022",
        ModelPricing::new("Claude Haiku 3.5", 0.80, 1.00, 1.60, 0.08, 4.00),
    );
    table.insert(
        "claude-3-haiku-20240307",
        ModelPricing::new("Claude Haiku 3", 0.25, 0.30, 0.50, 0.03, 1.25),
    );

    table
}
