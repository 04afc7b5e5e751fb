//! Command-line and environment configuration.
//!
//! Configuration is resolved in three layers: built-in defaults, `CCSL_*`
//! environment variables, command-line flags, and finally an optional env
//! file (`--env`) whose `CCSL_*` entries override everything else — the file
//! can be edited between prompts to reconfigure the status line without
//! touching the Claude Code settings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, warn};

use ccsl_core::{CcslError, Result};
use ccsl_metrics::ThresholdLadder;
use ccsl_render::{parse_field_list, Field, NumberStyle, RenderConfig, Style, Theme};

/// Claude Code status line generator.
///
/// Reads a JSON session descriptor on stdin and prints one styled status
/// line to stdout.
#[derive(Parser, Debug)]
#[command(name = "ccsl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Color theme
    #[arg(long, env = "CCSL_THEME", default_value = "default")]
    pub theme: String,

    /// Number formatting (compact, full, raw)
    #[arg(long, env = "CCSL_NUMBERS", default_value = "compact")]
    pub numbers: String,

    /// Separator style (powerline, simple, arrows, pipes, dots)
    #[arg(long, env = "CCSL_STYLE", default_value = "simple")]
    pub style: String,

    /// Disable emoji in output
    #[arg(long, env = "CCSL_NO_EMOJI")]
    pub no_emoji: bool,

    /// Output debug information to stderr
    #[arg(long)]
    pub debug: bool,

    /// Path to an environment file with CCSL_* variables
    #[arg(long)]
    pub env: Option<PathBuf>,

    /// Cache hit rate thresholds: green,yellow,orange minimum percentages
    #[arg(long, env = "CCSL_PERF_CACHE", default_value = "95,90,75")]
    pub perf_cache: String,

    /// Response time thresholds: green,yellow,orange maximum seconds
    #[arg(long, env = "CCSL_PERF_RESPONSE", default_value = "10,30,60")]
    pub perf_response: String,

    /// Comma-separated list of fields to display
    #[arg(env = "CCSL_FIELDS")]
    pub fields: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub render: RenderConfig,
    pub cache_thresholds: ThresholdLadder,
    pub response_thresholds: ThresholdLadder,
}

impl Cli {
    /// Resolve the final configuration, applying env-file overrides.
    pub fn into_config(self) -> Result<Config> {
        let overrides = match &self.env {
            Some(path) => parse_env_file(path),
            None => HashMap::new(),
        };

        let pick = |key: &str, cli_value: String| -> String {
            overrides.get(key).cloned().unwrap_or(cli_value)
        };

        let theme: Theme = pick("CCSL_THEME", self.theme)
            .parse()
            .map_err(CcslError::config)?;
        let numbers: NumberStyle = pick("CCSL_NUMBERS", self.numbers)
            .parse()
            .map_err(CcslError::config)?;
        let style: Style = pick("CCSL_STYLE", self.style)
            .parse()
            .map_err(CcslError::config)?;

        let no_emoji = match overrides.get("CCSL_NO_EMOJI") {
            Some(value) => value.eq_ignore_ascii_case("true"),
            None => self.no_emoji,
        };

        let cache_thresholds = parse_ladder(
            &pick("CCSL_PERF_CACHE", self.perf_cache),
            "cache",
            "95,90,75",
        )?;
        let response_thresholds = parse_ladder(
            &pick("CCSL_PERF_RESPONSE", self.perf_response),
            "response",
            "10,30,60",
        )?;

        let fields: Vec<Field> = match overrides
            .get("CCSL_FIELDS")
            .cloned()
            .or(self.fields)
        {
            Some(spec) => parse_field_list(&spec),
            None => {
                debug!("no fields specified, using defaults");
                Field::DEFAULTS.to_vec()
            }
        };

        Ok(Config {
            render: RenderConfig {
                theme,
                numbers,
                style,
                no_emoji,
                fields,
            },
            cache_thresholds,
            response_thresholds,
        })
    }
}

/// Parse a three-step threshold ladder from `a,b,c`.
fn parse_ladder(spec: &str, dimension: &str, example: &str) -> Result<ThresholdLadder> {
    let values: Vec<f64> = spec
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| invalid_ladder(dimension, example))?;

    let steps: [f64; 3] = values
        .try_into()
        .map_err(|_| invalid_ladder(dimension, example))?;

    Ok(ThresholdLadder(steps))
}

fn invalid_ladder(dimension: &str, example: &str) -> CcslError {
    CcslError::config(format!(
        "invalid {dimension} thresholds: expected three comma-separated numbers (e.g. {example})"
    ))
}

/// Parse an environment file into its `CCSL_*` variables.
///
/// Lines are `VAR=value` with optional single or double quotes; `#` comments
/// and blank lines are skipped, and the format stays valid bash syntax.
/// Non-`CCSL_` keys are ignored. An unreadable file degrades to no
/// overrides.
fn parse_env_file(path: &Path) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read env file");
            return vars;
        }
    };

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if !key.starts_with("CCSL_") {
            continue;
        }

        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);

        vars.insert(key.to_string(), value.to_string());
    }

    debug!(path = %path.display(), count = vars.len(), "loaded env file overrides");
    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["ccsl"];
        argv.extend(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = cli(&[]).into_config().unwrap();
        assert_eq!(config.render.theme, Theme::Default);
        assert_eq!(config.render.style, Style::Simple);
        assert_eq!(config.render.fields, Field::DEFAULTS.to_vec());
        assert_eq!(config.cache_thresholds, ThresholdLadder([95.0, 90.0, 75.0]));
        assert_eq!(
            config.response_thresholds,
            ThresholdLadder([10.0, 30.0, 60.0])
        );
    }

    #[test]
    fn test_explicit_arguments() {
        let config = cli(&[
            "--theme",
            "nord",
            "--style",
            "pipes",
            "--perf-cache",
            "60,40,20",
            "folder,cost",
        ])
        .into_config()
        .unwrap();

        assert_eq!(config.render.theme, Theme::Nord);
        assert_eq!(config.render.style, Style::Pipes);
        assert_eq!(config.render.fields, vec![Field::Folder, Field::Cost]);
        assert_eq!(config.cache_thresholds, ThresholdLadder([60.0, 40.0, 20.0]));
    }

    #[test]
    fn test_invalid_thresholds_are_config_errors() {
        let err = cli(&["--perf-cache", "95,90"]).into_config().unwrap_err();
        assert_eq!(err.exit_code(), 1);

        let err = cli(&["--perf-response", "a,b,c"]).into_config().unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_invalid_theme_is_a_config_error() {
        let err = cli(&["--theme", "synthwave"]).into_config().unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_env_file_overrides_cli() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# ccsl overrides").unwrap();
        writeln!(file, "CCSL_THEME=\"gruvbox\"").unwrap();
        writeln!(file, "CCSL_FIELDS='model,cost'").unwrap();
        writeln!(file, "CCSL_NO_EMOJI=true").unwrap();
        writeln!(file, "PATH=/tmp/ignored").unwrap();
        file.flush().unwrap();

        let config = cli(&[
            "--theme",
            "nord",
            "--env",
            file.path().to_str().unwrap(),
            "folder",
        ])
        .into_config()
        .unwrap();

        assert_eq!(config.render.theme, Theme::Gruvbox);
        assert_eq!(config.render.fields, vec![Field::Model, Field::Cost]);
        assert!(config.render.no_emoji);
    }

    #[test]
    fn test_missing_env_file_degrades_to_no_overrides() {
        let config = cli(&["--env", "/no/such/file"]).into_config().unwrap();
        assert_eq!(config.render.theme, Theme::Default);
    }
}
