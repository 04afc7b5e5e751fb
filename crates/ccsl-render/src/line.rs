//! Status line assembly.
//!
//! Consumes the derived metric set and produces the final one-line string:
//! field contents, theme colors, separator styles, and powerline segment
//! grouping. A metric that is absent simply drops its field from the line;
//! nothing renders a placeholder.

use std::path::Path;
use std::str::FromStr;

use ccsl_core::GitStatus;
use ccsl_metrics::{BadgeLevel, SessionMetrics};

use crate::color::paint;
use crate::fields::Field;
use crate::format::{format_cost, format_duration, format_number, NumberStyle};
use crate::theme::{Theme, ThemeColors, BADGE_GRAY};

/// Powerline right arrow (requires a powerline-patched font).
const POWERLINE_ARROW: &str = "\u{e0b0}";

/// Badge dot colors per level: green, darker yellow, orange, red.
const LEVEL_COLORS: [u8; 4] = [82, 220, 208, 196];

/// Separator / segment style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    Powerline,
    #[default]
    Simple,
    Arrows,
    Pipes,
    Dots,
}

impl Style {
    fn separator(self) -> &'static str {
        match self {
            Style::Pipes => " | ",
            Style::Arrows => " \u{2192} ",
            Style::Dots => " \u{b7} ",
            // simple, and the powerline fallback without a theme
            Style::Simple | Style::Powerline => " > ",
        }
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "powerline" => Ok(Style::Powerline),
            "simple" => Ok(Style::Simple),
            "arrows" => Ok(Style::Arrows),
            "pipes" => Ok(Style::Pipes),
            "dots" => Ok(Style::Dots),
            other => Err(format!(
                "unknown style '{other}' (expected powerline, simple, arrows, pipes, or dots)"
            )),
        }
    }
}

/// Rendering configuration resolved from CLI and environment.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub theme: Theme,
    pub numbers: NumberStyle,
    pub style: Style,
    pub no_emoji: bool,
    pub fields: Vec<Field>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            numbers: NumberStyle::default(),
            style: Style::default(),
            no_emoji: false,
            fields: Field::DEFAULTS.to_vec(),
        }
    }
}

/// Everything the renderer consumes for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct StatusContext<'a> {
    /// Model display name (already defaulted upstream)
    pub model_name: &'a str,

    /// Session working directory
    pub cwd: &'a str,

    /// Git probe result
    pub git: &'a GitStatus,

    /// Derived metrics; `None` for a session with no transcript
    pub metrics: Option<&'a SessionMetrics>,

    /// Performance badge; omitted when there is insufficient data
    pub badge: Option<BadgeLevel>,
}

/// Render the status line.
pub fn render(config: &RenderConfig, ctx: &StatusContext) -> String {
    let theme_colors = config.theme.colors();
    let powerline = config.style == Style::Powerline && theme_colors.is_some();

    let mut parts: Vec<String> = Vec::new();
    let mut segments: Vec<(String, Option<u8>)> = Vec::new();

    for field in Field::ORDER {
        if !config.fields.contains(field) {
            continue;
        }
        let Some(content) = field_content(*field, config, ctx) else {
            continue;
        };

        if powerline {
            // Badge gets a gray background for contrast
            let bg = if *field == Field::Badge {
                Some(BADGE_GRAY)
            } else {
                field_color(*field, theme_colors)
            };
            segments.push((content, bg));
        } else {
            // The badge carries its own colors; everything else gets the
            // theme's foreground color for its role.
            let content = if *field == Field::Badge {
                content
            } else {
                match field_color(*field, theme_colors) {
                    Some(color) => paint(&content, Some(color), None, false),
                    None => content,
                }
            };
            parts.push(content);
        }
    }

    if powerline {
        render_powerline(&segments)
    } else {
        parts.join(config.style.separator())
    }
}

/// Theme color for a field's role.
fn field_color(field: Field, colors: Option<ThemeColors>) -> Option<u8> {
    let colors = colors?;
    let code = match field {
        Field::Badge => BADGE_GRAY,
        Field::Folder => colors.folder,
        Field::Git => colors.git,
        Field::Model
        | Field::PerfCacheRate
        | Field::PerfResponseTime
        | Field::PerfSessionTime
        | Field::PerfMessageCount
        | Field::PerfAllMetrics => colors.model,
        Field::Input => colors.input,
        Field::Output | Field::Tokens => colors.output,
        Field::Cost => colors.cost,
    };
    Some(code)
}

/// Produce one field's text, or `None` when its data is unavailable.
fn field_content(field: Field, config: &RenderConfig, ctx: &StatusContext) -> Option<String> {
    let numbers = config.numbers;
    let no_emoji = config.no_emoji;

    match field {
        Field::Badge => ctx.badge.map(|level| {
            render_badge(
                level,
                config.theme != Theme::None,
                config.style == Style::Powerline,
                no_emoji,
            )
        }),
        Field::Folder => Some(folder_name(ctx.cwd)),
        Field::Git => ctx.git.branch.as_ref().map(|branch| {
            if ctx.git.modified_count > 0 {
                let indicator = if no_emoji { "*" } else { "\u{25cf}" };
                format!("{branch} {indicator}")
            } else {
                branch.clone()
            }
        }),
        Field::Model => Some(ctx.model_name.to_string()),
        Field::Input => ctx.metrics.map(|m| {
            let base = format_number(m.tokens.input_tokens, numbers);
            let cache_write = format_number(m.tokens.cache_creation_tokens, numbers);
            let cache_read = format_number(m.tokens.cache_read_tokens, numbers);
            let prefix = if no_emoji { "In:" } else { "\u{2191}" };
            format!("{prefix} ({base}, {cache_write}, {cache_read})")
        }),
        Field::Output => ctx.metrics.map(|m| {
            let prefix = if no_emoji { "Out:" } else { "\u{2193}" };
            format!("{prefix} {}", format_number(m.tokens.output_tokens, numbers))
        }),
        Field::Tokens => ctx.metrics.map(|m| {
            let prefix = if no_emoji { "Tok:" } else { "\u{29c9}" };
            format!("{prefix} {}", format_number(m.context_size, numbers))
        }),
        Field::Cost => ctx.metrics.map(|m| format_cost(m.cost.total_usd)),
        Field::PerfCacheRate => ctx.metrics.map(|m| cache_rate_text(m, no_emoji)),
        Field::PerfResponseTime => ctx.metrics.map(|m| response_time_text(m, no_emoji)),
        Field::PerfSessionTime => ctx.metrics.map(|m| session_time_text(m, no_emoji)),
        Field::PerfMessageCount => ctx.metrics.map(|m| message_count_text(m, no_emoji)),
        Field::PerfAllMetrics => ctx.metrics.map(|m| {
            [
                cache_rate_text(m, no_emoji),
                response_time_text(m, no_emoji),
                session_time_text(m, no_emoji),
                message_count_text(m, no_emoji),
            ]
            .join(" ")
        }),
    }
}

fn cache_rate_text(metrics: &SessionMetrics, no_emoji: bool) -> String {
    let rate = metrics.perf.cache_hit_rate * 100.0;
    if no_emoji {
        format!("Cache: {rate:.0}%")
    } else {
        format!("\u{26a1} {rate:.0}%")
    }
}

fn response_time_text(metrics: &SessionMetrics, no_emoji: bool) -> String {
    let time = format_duration(metrics.perf.avg_response_secs);
    if no_emoji {
        format!("Response: {time}")
    } else {
        format!("\u{23f1} {time}")
    }
}

fn session_time_text(metrics: &SessionMetrics, no_emoji: bool) -> String {
    let time = format_duration(metrics.perf.session_duration_secs);
    if no_emoji {
        format!("Session: {time}")
    } else {
        format!("\u{1f550} {time}")
    }
}

fn message_count_text(metrics: &SessionMetrics, no_emoji: bool) -> String {
    let count = metrics.perf.message_count;
    if no_emoji {
        format!("Messages: {count}")
    } else {
        format!("\u{1f4ac} {count}")
    }
}

/// Folder name from the working directory, truncated for display.
fn folder_name(cwd: &str) -> String {
    let path = Path::new(cwd);
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => {
            if cwd == "/" {
                "/".to_string()
            } else {
                path.parent()
                    .and_then(Path::file_name)
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            }
        }
    };

    if name.chars().count() > 20 {
        let truncated: String = name.chars().take(17).collect();
        format!("{truncated}...")
    } else {
        name
    }
}

/// Draw the four-dot performance badge.
///
/// The dot at the badge level is the active one. With colors, the active dot
/// takes its level color and inactive dots are gray; without colors, open
/// circles keep the dots distinguishable.
fn render_badge(level: BadgeLevel, colored: bool, powerline: bool, no_emoji: bool) -> String {
    let active = if no_emoji { "*" } else { "\u{25cf}" };
    let inactive = if no_emoji {
        "o"
    } else if colored {
        "\u{25cf}"
    } else {
        "\u{25cb}"
    };

    if !colored {
        return (0..4)
            .map(|i| if i == level.index() { active } else { inactive })
            .collect();
    }

    if powerline {
        // One continuous gray background; the segment wrapper supplies the
        // final reset.
        let mut out = format!("\x1b[48;5;{BADGE_GRAY}m");
        for i in 0..4 {
            if i == level.index() {
                out.push_str(&format!("\x1b[38;5;{}m{active}", LEVEL_COLORS[i]));
            } else {
                out.push_str(&format!("\x1b[38;5;0m{inactive}"));
            }
        }
        return out;
    }

    (0..4)
        .map(|i| {
            if i == level.index() {
                paint(active, Some(LEVEL_COLORS[i]), None, false)
            } else {
                paint(inactive, Some(BADGE_GRAY), None, false)
            }
        })
        .collect()
}

/// Assemble powerline segments, grouping adjacent fields that share a
/// background into a single segment with transition arrows between groups.
fn render_powerline(segments: &[(String, Option<u8>)]) -> String {
    let mut groups: Vec<(String, Option<u8>)> = Vec::new();
    for (text, bg) in segments {
        match groups.last_mut() {
            Some((acc, group_bg)) if *group_bg == *bg && group_bg.is_some() => {
                acc.push(' ');
                acc.push_str(text);
            }
            _ => groups.push((text.clone(), *bg)),
        }
    }

    let mut out = String::new();
    for (i, (text, bg)) in groups.iter().enumerate() {
        let Some(bg) = *bg else {
            continue;
        };

        out.push_str(&paint(&format!(" {text} "), Some(0), Some(bg), false));

        if i + 1 < groups.len() {
            match groups[i + 1].1 {
                Some(next_bg) => {
                    out.push_str(&paint(POWERLINE_ARROW, Some(bg), Some(next_bg), false))
                }
                None => out.push_str(&paint(POWERLINE_ARROW, Some(bg), None, false)),
            }
        } else {
            // Final arrow fades into the terminal background
            out.push_str(&paint(POWERLINE_ARROW, Some(bg), Some(0), false));
        }
    }

    out
}
