//! Performance metrics derived from transcript timestamps.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::transcript::TranscriptEntry;
use crate::usage::TokenTotals;

/// Response samples outside this window (seconds) are treated as outliers:
/// clock skew, multi-turn batching, or resumed sessions.
const MAX_RESPONSE_SECS: f64 = 300.0;

/// Derived performance metrics for a session.
///
/// Absence of sufficient data yields the zero default for each metric, never
/// an error.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerfMetrics {
    /// Fraction of input-side tokens served from cache, in [0, 1]
    pub cache_hit_rate: f64,

    /// Mean accepted user-to-assistant gap in seconds
    pub avg_response_secs: f64,

    /// Count of timestamped user events
    pub message_count: usize,

    /// Wall-clock span of the session in seconds
    pub session_duration_secs: f64,
}

/// Compute performance metrics from the entry sequence and token totals.
pub fn analyze(entries: &[TranscriptEntry], totals: &TokenTotals) -> PerfMetrics {
    let mut metrics = PerfMetrics {
        cache_hit_rate: totals.cache_hit_rate(),
        ..PerfMetrics::default()
    };

    // Entries with missing or unparseable timestamps are excluded from all
    // timing metrics.
    let mut user_timestamps: Vec<DateTime<Utc>> = Vec::new();
    let mut assistant_timestamps: Vec<DateTime<Utc>> = Vec::new();

    for entry in entries {
        let Some(ts) = entry.parsed_timestamp() else {
            continue;
        };

        if entry.is_user() {
            user_timestamps.push(ts);
        } else if entry.is_assistant() {
            assistant_timestamps.push(ts);
        }
    }

    debug!(
        user = user_timestamps.len(),
        assistant = assistant_timestamps.len(),
        "collected timestamped events"
    );

    // For each assistant event, the gap from the latest strictly-earlier
    // user event is a candidate sample.
    let mut samples: Vec<f64> = Vec::new();
    for assistant_ts in &assistant_timestamps {
        let prior_user = user_timestamps
            .iter()
            .filter(|user_ts| *user_ts < assistant_ts)
            .max();

        if let Some(user_ts) = prior_user {
            let gap = (*assistant_ts - *user_ts).num_milliseconds() as f64 / 1000.0;
            if gap > 0.0 && gap < MAX_RESPONSE_SECS {
                samples.push(gap);
            }
        }
    }

    if !samples.is_empty() {
        metrics.avg_response_secs = samples.iter().sum::<f64>() / samples.len() as f64;
    }

    metrics.message_count = user_timestamps.len();

    let mut all_timestamps = user_timestamps;
    all_timestamps.extend(assistant_timestamps);
    if all_timestamps.len() >= 2 {
        let earliest = all_timestamps.iter().min().copied();
        let latest = all_timestamps.iter().max().copied();
        if let (Some(earliest), Some(latest)) = (earliest, latest) {
            metrics.session_duration_secs =
                (latest - earliest).num_milliseconds() as f64 / 1000.0;
        }
    }

    metrics
}
