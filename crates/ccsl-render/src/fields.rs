//! Status line fields and their display order.

use tracing::debug;

/// A displayable status line field.
///
/// Fields always render in the canonical [`Field::ORDER`], regardless of the
/// order they were requested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Badge,
    Folder,
    Git,
    Model,
    PerfCacheRate,
    PerfResponseTime,
    PerfSessionTime,
    PerfMessageCount,
    PerfAllMetrics,
    Input,
    Output,
    Tokens,
    Cost,
}

impl Field {
    /// Canonical display order for all fields.
    pub const ORDER: &'static [Field] = &[
        Field::Badge,
        Field::Folder,
        Field::Git,
        Field::Model,
        Field::PerfCacheRate,
        Field::PerfResponseTime,
        Field::PerfSessionTime,
        Field::PerfMessageCount,
        Field::PerfAllMetrics,
        Field::Input,
        Field::Output,
        Field::Tokens,
        Field::Cost,
    ];

    /// Fields shown when none are requested.
    pub const DEFAULTS: &'static [Field] = &[
        Field::Badge,
        Field::Folder,
        Field::Git,
        Field::Model,
        Field::Tokens,
        Field::Cost,
    ];

    /// Parse one field name.
    pub fn from_name(name: &str) -> Option<Field> {
        match name {
            "badge" => Some(Field::Badge),
            "folder" => Some(Field::Folder),
            "git" => Some(Field::Git),
            "model" => Some(Field::Model),
            "perf-cache-rate" => Some(Field::PerfCacheRate),
            "perf-response-time" => Some(Field::PerfResponseTime),
            "perf-session-time" => Some(Field::PerfSessionTime),
            "perf-message-count" => Some(Field::PerfMessageCount),
            "perf-all-metrics" => Some(Field::PerfAllMetrics),
            "input" => Some(Field::Input),
            "output" => Some(Field::Output),
            "tokens" => Some(Field::Tokens),
            "cost" => Some(Field::Cost),
            _ => None,
        }
    }
}

/// Parse a comma-separated field list.
///
/// Unknown names are skipped with a diagnostic; a list with no usable
/// entries falls back to the defaults.
pub fn parse_field_list(spec: &str) -> Vec<Field> {
    let mut fields = Vec::new();

    for name in spec.split(',') {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        match Field::from_name(name) {
            Some(field) => fields.push(field),
            None => debug!(field = name, "ignoring unknown field"),
        }
    }

    if fields.is_empty() {
        debug!("no usable fields specified, using defaults");
        fields = Field::DEFAULTS.to_vec();
    }

    fields
}
