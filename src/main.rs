//! tailchat - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tailchat::config::{self, ConfigError, ResolvedConfig};
use tailchat::model::AppError;
use tracing::info;

/// tailchat - live chat view for JSON-lines message feeds
#[derive(Parser, Debug)]
#[command(name = "tailchat")]
#[command(version)]
#[command(about = "Live-updating terminal chat view with mouse-wheel scrollback")]
pub struct Args {
    /// Path to JSONL chat feed (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Follow the file for new messages (like tail -f)
    #[arg(short, long)]
    pub follow: bool,

    /// Disable author colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Load configuration with full precedence chain:
/// Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, ConfigError> {
    let config_file = config::load_config_with_precedence(args.config.clone())?;
    let merged = config::merge_config(config_file);
    let with_env = config::apply_env_overrides(merged)?;

    // Flags only override when explicitly set
    let follow_override = args.follow.then_some(true);
    let no_color_override = args.no_color.then_some(true);
    Ok(config::apply_cli_overrides(with_env, follow_override, no_color_override))
}

/// Resolve configuration, open the feed and run the chat view.
///
/// The input source is checked before logging starts, so a bad path fails without
/// creating a log file.
fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;
    let input_source = tailchat::source::detect_input_source(args.file, config.follow)?;

    // Initialize tracing with configured log file path
    tailchat::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");
    info!(source = ?input_source, "Input source detected");

    tailchat::view::run_session(&input_source, &config)?;

    info!("Session ended");
    Ok(())
}

fn main() -> Result<(), AppError> {
    run(Args::parse())
}
