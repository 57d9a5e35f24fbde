//! smartcalc - Entry Point

use clap::Parser;
use smartcalc::explain::{ExplanationWorker, GeminiClient};
use smartcalc::model::{Mode, Theme};
use smartcalc::view::ColorConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// smartcalc - terminal calculator with AI explanations
#[derive(Parser, Debug)]
#[command(name = "smartcalc")]
#[command(version)]
#[command(about = "Terminal calculator with history and step-by-step explanations")]
pub struct Args {
    /// Panel to show on startup
    #[arg(long, value_parser = ["standard", "scientific", "ai"])]
    pub mode: Option<String>,

    /// Color theme
    #[arg(long, value_parser = ["light", "dark"])]
    pub theme: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = smartcalc::config::load_config_with_precedence(args.config.clone())?;
        let merged = smartcalc::config::merge_config(config_file);
        let with_env = smartcalc::config::apply_env_overrides(merged);

        // clap already restricted the values, so parsing cannot fail here.
        let theme_override = args.theme.as_deref().map(str::parse::<Theme>).transpose()?;
        let mode_override = args.mode.as_deref().map(str::parse::<Mode>).transpose()?;

        smartcalc::config::apply_cli_overrides(with_env, theme_override, mode_override)
    };

    smartcalc::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let client = GeminiClient::from_env(config.explanation.clone())?;
    let worker = ExplanationWorker::new(Arc::new(client));
    let colors = ColorConfig::from_env_and_args(args.no_color);

    smartcalc::view::run(&config, worker, colors)?;

    Ok(())
}
