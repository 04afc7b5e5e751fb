//! Color themes.
//!
//! Each theme maps the six field color roles to 256-color ANSI codes. The
//! `none` theme carries no colors at all and suppresses every escape code in
//! the output.

use std::str::FromStr;

/// Badge dots are always 50% gray regardless of theme.
pub const BADGE_GRAY: u8 = 244;

/// Available color themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Default,
    Solarized,
    Nord,
    Dracula,
    Gruvbox,
    Tokyo,
    Catppuccin,
    Minimal,
    None,
}

/// 256-color codes for the six field color roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub folder: u8,
    pub git: u8,
    pub model: u8,
    pub input: u8,
    pub output: u8,
    pub cost: u8,
}

impl Theme {
    /// The palette for this theme, or `None` for the colorless theme.
    pub fn colors(self) -> Option<ThemeColors> {
        let colors = match self {
            Theme::Default => ThemeColors {
                folder: 208, // Orange
                git: 39,     // Blue
                model: 141,  // Purple
                input: 83,   // Green
                output: 214, // Gold
                cost: 196,   // Red
            },
            Theme::Solarized => ThemeColors {
                folder: 136,
                git: 33,
                model: 61,
                input: 64,
                output: 166,
                cost: 160,
            },
            Theme::Nord => ThemeColors {
                folder: 223,
                git: 109,
                model: 139,
                input: 108,
                output: 179,
                cost: 167,
            },
            Theme::Dracula => ThemeColors {
                folder: 215,
                git: 117,
                model: 141,
                input: 84,
                output: 222,
                cost: 203,
            },
            Theme::Gruvbox => ThemeColors {
                folder: 172,
                git: 66,
                model: 132,
                input: 106,
                output: 214,
                cost: 167,
            },
            Theme::Tokyo => ThemeColors {
                folder: 203,
                git: 75,
                model: 176,
                input: 115,
                output: 221,
                cost: 197,
            },
            Theme::Catppuccin => ThemeColors {
                folder: 217,
                git: 117,
                model: 183,
                input: 120,
                output: 223,
                cost: 210,
            },
            Theme::Minimal => ThemeColors {
                folder: 242,
                git: 245,
                model: 248,
                input: 250,
                output: 252,
                cost: 252,
            },
            Theme::None => return None,
        };

        Some(colors)
    }

    /// All theme names accepted on the command line.
    pub const NAMES: &'static [&'static str] = &[
        "default",
        "solarized",
        "nord",
        "dracula",
        "gruvbox",
        "tokyo",
        "catppuccin",
        "minimal",
        "none",
    ];
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Theme::Default),
            "solarized" => Ok(Theme::Solarized),
            "nord" => Ok(Theme::Nord),
            "dracula" => Ok(Theme::Dracula),
            "gruvbox" => Ok(Theme::Gruvbox),
            "tokyo" => Ok(Theme::Tokyo),
            "catppuccin" => Ok(Theme::Catppuccin),
            "minimal" => Ok(Theme::Minimal),
            "none" => Ok(Theme::None),
            other => Err(format!(
                "unknown theme '{other}' (expected one of: {})",
                Theme::NAMES.join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_parses() {
        for name in Theme::NAMES {
            assert!(name.parse::<Theme>().is_ok(), "{name} should parse");
        }
    }

    #[test]
    fn test_none_theme_has_no_colors() {
        assert!(Theme::None.colors().is_none());
        assert!(Theme::Minimal.colors().is_some());
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        assert!("synthwave".parse::<Theme>().is_err());
    }
}
