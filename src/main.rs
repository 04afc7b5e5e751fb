//! ccsl - Claude Code Status Line
//!
//! Generates a customizable status line for Claude Code showing performance
//! metrics, git status, session information, and cost calculations.
//!
//! ## Usage
//!
//! ```bash
//! # In Claude Code settings, as the statusLine command:
//! ccsl --theme nord --style powerline
//!
//! # Choose fields explicitly
//! ccsl badge,folder,git,model,cost
//!
//! # Debug diagnostics on stderr
//! echo '{"cwd": "."}' | ccsl --debug
//! ```
//!
//! ## Exit Codes
//!
//! - 0 - Success
//! - 1 - Configuration/argument error
//! - 2 - Input/JSON error

mod cli;

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use ccsl_core::{git, init_logging, SessionInput};
use ccsl_metrics::{classify, load_transcript, SessionMetrics};
use ccsl_render::{render, StatusContext, Theme, RESET};

use crate::cli::{Cli, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("Error: no input provided; ccsl expects JSON from Claude Code on stdin");
        return ExitCode::from(2);
    }

    let input = match SessionInput::from_reader(stdin.lock()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    let line = status_line(&config, &input).await;
    println!("{line}");
    ExitCode::SUCCESS
}

/// Derive all metrics for the session and render the final line.
async fn status_line(config: &Config, input: &SessionInput) -> String {
    let cwd = input.working_dir();

    let git = git::probe(&cwd).await;
    debug!(branch = ?git.branch, modified = git.modified_count, "git status");

    let entries = load_transcript(input.transcript_path.as_deref());
    debug!(count = entries.len(), "transcript entries loaded");

    let metrics = SessionMetrics::compute(&entries);
    if let Some(metrics) = &metrics {
        debug!(
            tokens = metrics.tokens.total_tokens(),
            cost_usd = metrics.cost.total_usd,
            cache_hit_rate = metrics.perf.cache_hit_rate,
            "session metrics"
        );
        for (model, cost) in &metrics.cost.by_model {
            debug!(model, cost_usd = cost, "cost breakdown");
        }
    }

    let badge = metrics.as_ref().map(|m| {
        classify(
            m.perf.cache_hit_rate,
            m.perf.avg_response_secs,
            &config.cache_thresholds,
            &config.response_thresholds,
        )
    });

    let ctx = StatusContext {
        model_name: input.model_display_name(),
        cwd: &cwd,
        git: &git,
        metrics: metrics.as_ref(),
        badge,
    };

    let mut line = render(&config.render, &ctx);
    // Trailing reset prevents color bleed into the terminal
    if config.render.theme != Theme::None {
        line.push_str(RESET);
    }
    line
}
