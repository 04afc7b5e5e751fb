//! Number, cost, and duration formatting.

use std::str::FromStr;

/// Number formatting preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberStyle {
    /// Abbreviated: `1.2K`, `3.4M`
    #[default]
    Compact,

    /// Thousands separators: `1,234`
    Full,

    /// Unformatted: `1234`
    Raw,
}

impl FromStr for NumberStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact" => Ok(NumberStyle::Compact),
            "full" => Ok(NumberStyle::Full),
            "raw" => Ok(NumberStyle::Raw),
            other => Err(format!(
                "unknown number style '{other}' (expected compact, full, or raw)"
            )),
        }
    }
}

/// Format a token count per the style preference.
pub fn format_number(value: u64, style: NumberStyle) -> String {
    match style {
        NumberStyle::Compact => {
            if value >= 1_000_000 {
                format!("{:.1}M", value as f64 / 1_000_000.0)
            } else if value >= 1_000 {
                format!("{:.1}K", value as f64 / 1_000.0)
            } else {
                value.to_string()
            }
        }
        NumberStyle::Full => group_thousands(value),
        NumberStyle::Raw => value.to_string(),
    }
}

/// Format a cost as dollars at $1 and above, integer cents below.
pub fn format_cost(cost: f64) -> String {
    if cost >= 1.0 {
        format!("${cost:.2}")
    } else {
        let cents = (cost * 100.0).round() as i64;
        format!("{cents}\u{a2}")
    }
}

/// Format a duration in seconds to a short human-readable form.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{seconds:.1}s")
    } else if seconds < 3600.0 {
        format!("{:.0}m", seconds / 60.0)
    } else {
        let hours = seconds / 3600.0;
        if hours < 24.0 {
            format!("{hours:.1}h")
        } else {
            format!("{:.0}d", hours / 24.0)
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
