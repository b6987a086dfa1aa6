//! Policy config inspector
//!
//! Loads a trading policy config file, applies all load-time derivations
//! and prints the resulting typed configuration as JSON.
//!
//! # Usage
//! ```sh
//! cargo run -- --config bot.ini
//! ```
//!
//! # Environment Variables
//! - `POLICY_CONFIG_PATH` - Config file used when `--config` is not given (default: config.ini)
//! - `RUST_LOG` - Log filter (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use policy_config::ConfigStore;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the INI config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print compact JSON instead of pretty JSON
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let args = Args::parse();
    let path = args
        .config
        .or_else(|| std::env::var("POLICY_CONFIG_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("config.ini"));

    let store = ConfigStore::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    info!(
        "Configuration loaded: Name={}, Advisor={}, Contracts={:?}, Type={}",
        store.general().name,
        store.broker().is_advisor,
        store.policy().main_contract,
        store.policy().contract_type
    );

    let json = if args.compact {
        serde_json::to_string(store.config())
    } else {
        serde_json::to_string_pretty(store.config())
    }
    .context("Failed to serialize config")?;
    println!("{}", json);

    Ok(())
}
