//! Performance badge classification.
//!
//! Two independent threshold ladders map the cache-hit rate and the average
//! response latency each to a discrete level; the overall badge is the worse
//! of the two, since either a poor cache rate or a slow response indicates
//! degraded performance.

/// Discrete performance severity, ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BadgeLevel {
    Green = 0,
    Yellow = 1,
    Orange = 2,
    Red = 3,
}

impl BadgeLevel {
    /// Numeric level, 0 best through 3 worst.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A three-step threshold ladder (green, yellow, orange boundaries).
///
/// For the cache dimension these are descending minimum percentages; for the
/// response dimension, ascending maximum seconds. Anything beyond the last
/// step is red.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdLadder(pub [f64; 3]);

impl ThresholdLadder {
    /// Default cache-hit rate ladder, in percent.
    pub fn default_cache() -> Self {
        Self([95.0, 90.0, 75.0])
    }

    /// Default response time ladder, in seconds.
    pub fn default_response() -> Self {
        Self([10.0, 30.0, 60.0])
    }
}

/// Classify the two performance signals into an overall badge level.
///
/// `cache_hit_rate` is a fraction in [0, 1]; the cache ladder is compared
/// against it as a percentage.
pub fn classify(
    cache_hit_rate: f64,
    avg_response_secs: f64,
    cache: &ThresholdLadder,
    response: &ThresholdLadder,
) -> BadgeLevel {
    let cache_percent = cache_hit_rate * 100.0;
    let cache_level = if cache_percent >= cache.0[0] {
        BadgeLevel::Green
    } else if cache_percent >= cache.0[1] {
        BadgeLevel::Yellow
    } else if cache_percent >= cache.0[2] {
        BadgeLevel::Orange
    } else {
        BadgeLevel::Red
    };

    let response_level = if avg_response_secs <= response.0[0] {
        BadgeLevel::Green
    } else if avg_response_secs <= response.0[1] {
        BadgeLevel::Yellow
    } else if avg_response_secs <= response.0[2] {
        BadgeLevel::Orange
    } else {
        BadgeLevel::Red
    };

    cache_level.max(response_level)
}
