//! `billboard` command line tool
//!
//! Resolves billing status banners and landing routes from JSON inputs.

use anyhow::{Context, Result};
use billboard_cli::{navigate, setup_logging, BannerReport, BillboardConfig};
use billboard_core::{DisplayContext, OrganizationBillingSnapshot};
use billboard_navigation::NavigationInput;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Billing status banners and landing navigation
#[derive(Parser)]
#[command(name = "billboard")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive (overridden by RUST_LOG)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the status banner for a billing snapshot
    Banner {
        /// Snapshot JSON file
        #[arg(long, value_name = "PATH")]
        snapshot: PathBuf,

        /// Where the banner is shown (top-level, billing-page)
        #[arg(long, default_value = "top-level")]
        context: DisplayContext,

        /// Print the descriptor as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve the default landing route
    Navigate {
        /// Navigation input JSON file
        #[arg(long, value_name = "PATH")]
        input: PathBuf,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging settings live in the config, so it is read before a subscriber exists
    let config = match &cli.config {
        Some(path) => BillboardConfig::load(path)?,
        None => BillboardConfig::default(),
    };

    setup_logging(&config, cli.log_level.as_deref(), cli.log_json)?;

    if let Some(path) = &cli.config {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    match cli.command {
        Commands::Banner {
            snapshot,
            context,
            json,
        } => {
            let snapshot: OrganizationBillingSnapshot = read_json(&snapshot)?;
            let report = BannerReport::resolve(&snapshot, context, &config);
            if json {
                println!("{}", report.to_json()?);
            } else {
                println!("{}", report.to_text(&config));
            }
        }
        Commands::Navigate { input } => {
            let input: NavigationInput = read_json(&input)?;
            let landing = navigate(input, &config);
            println!("{}", landing.target.path());
        }
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}
