//! Session-wide token accounting.

use serde::Serialize;

use crate::transcript::TranscriptEntry;

/// Accumulated token counters across an entire transcript.
///
/// Built empty, bumped once per usage-bearing entry in a single pass, never
/// decremented. Summation is commutative so the result is order-independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenTotals {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_creation_tokens: u64,
    pub cache_read_tokens: u64,
}

impl TokenTotals {
    /// Sum of all four counters.
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens + self.cache_creation_tokens + self.cache_read_tokens
    }

    /// Tokens that count toward context: input + cache creation + output.
    pub fn context_size(&self) -> u64 {
        self.input_tokens + self.cache_creation_tokens + self.output_tokens
    }

    /// Fraction of input-side tokens served from cache, in [0, 1].
    ///
    /// Defined as 0.0 when no input-side tokens exist.
    pub fn cache_hit_rate(&self) -> f64 {
        let denominator =
            self.input_tokens + self.cache_creation_tokens + self.cache_read_tokens;
        if denominator == 0 {
            return 0.0;
        }
        self.cache_read_tokens as f64 / denominator as f64
    }
}

/// Sum token usage across all entries in one pass.
///
/// Visits every entry exactly once; entries without a usage-bearing shape
/// contribute nothing.
pub fn token_totals(entries: &[TranscriptEntry]) -> TokenTotals {
    let mut totals = TokenTotals::default();

    for entry in entries {
        if let Some(usage) = entry.usage() {
            totals.input_tokens += usage.input_tokens;
            totals.output_tokens += usage.output_tokens;
            totals.cache_creation_tokens += usage.cache_creation_input_tokens;
            totals.cache_read_tokens += usage.cache_read_input_tokens;
        }
    }

    totals
}
