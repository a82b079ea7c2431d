//! Glide CLI
//!
//! Runs JSON scroll scenarios against a headless viewer and prints or writes
//! the JSON report.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use glide_app::{run_loaded_scenario, HeadlessRunConfig, HeadlessScenario};
use glide_layout::ScrollViewerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "glide")]
#[command(author, version, about = "Headless scroll viewer scenarios")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log viewer internals (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and report the outcome
    Run {
        /// Scenario JSON file
        scenario: PathBuf,
        /// Viewer configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the JSON report here (relative path) instead of stdout
        #[arg(short, long)]
        report: Option<PathBuf>,
        /// Logical milliseconds per frame
        #[arg(long, default_value = "16")]
        tick_ms: u64,
    },
    /// Print the default viewer configuration
    Config,
    /// Validate a viewer configuration file
    Check {
        /// Viewer configuration (TOML)
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "glide=debug" } else { "glide=info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            config,
            report,
            tick_ms,
        } => run(&scenario, config.as_deref(), report.as_deref(), tick_ms),
        Commands::Config => {
            print!("{}", ScrollViewerConfig::default().to_toml_string()?);
            Ok(())
        }
        Commands::Check { config } => {
            load_config(Some(&config))?;
            tracing::info!("{} is valid", config.display());
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ScrollViewerConfig> {
    let Some(path) = path else {
        return Ok(ScrollViewerConfig::default());
    };
    ScrollViewerConfig::load(path)
        .with_context(|| format!("failed to load configuration {}", path.display()))
}

fn run(scenario: &Path, config: Option<&Path>, report: Option<&Path>, tick_ms: u64) -> Result<()> {
    let viewer_cfg = load_config(config)?;
    let loaded = HeadlessScenario::from_path(scenario)?;
    let runtime_cfg = HeadlessRunConfig {
        tick_ms,
        ..Default::default()
    };

    tracing::info!(
        scenario = %scenario.display(),
        steps = loaded.steps.len(),
        "running scenario"
    );
    let outcome = run_loaded_scenario(&loaded, &viewer_cfg, runtime_cfg)?;

    match report {
        Some(path) => {
            outcome.report().write_to_path(path)?;
            tracing::info!("report written to {}", path.display());
        }
        None => outcome.report().write_to_writer(&mut std::io::stdout().lock())?,
    }

    if outcome.is_failed() {
        let report = outcome.report();
        bail!(
            "scenario failed at step {}: {}",
            report.failed_step_index.unwrap_or_default(),
            report.message.as_deref().unwrap_or("assertion failed")
        );
    }

    tracing::info!(frames = outcome.report().elapsed_frames, "scenario passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("glide-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_invalid_config_names_file_and_field() {
        let path = write_config("negative.toml", "deceleration = -5.0\n");
        let err = load_config(Some(&path)).unwrap_err();
        std::fs::remove_file(&path).ok();

        let chain = format!("{err:#}");
        assert!(chain.contains("failed to load configuration"));
        assert!(chain.contains(&path.display().to_string()));
        assert!(chain.contains("deceleration"));
    }

    #[test]
    fn test_valid_config_is_loaded() {
        let path = write_config("vertical.toml", "scroll_mode = \"vertical\"\n");
        let config = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.scroll_mode, glide_layout::widgets::ScrollMode::Vertical);
        assert_eq!(load_config(None).unwrap(), ScrollViewerConfig::default());
    }

    #[test]
    fn test_cli_parses_run_arguments() {
        let cli = Cli::parse_from(["glide", "-v", "run", "snap.json", "--tick-ms", "8"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Run { tick_ms: 8, config: None, .. }
        ));
    }
}
