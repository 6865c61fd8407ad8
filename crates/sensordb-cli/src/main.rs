//! Command-line interface for the scalar sensor reading store.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `add` | Append one reading |
//! | `query` | Read readings of a tag over a time range |
//! | `delete` | Delete readings of a tag over a time range, in every tier |
//! | `first-after` | Print the tag of the first reading after a timestamp |
//! | `info` | Show database location, schema version and stored tags |
//!
//! # Configuration
//!
//! Settings are read from `config.toml` in the platform config directory
//! (or `--config PATH`). `--database` overrides the configured path.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use sensordb_store::Store;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod format;
mod util;

use cli::{Cli, Commands};
use commands::{QueryArgs, cmd_add, cmd_delete, cmd_first_after, cmd_info, cmd_query};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_validated(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_default().context("Failed to load config")?,
    };

    let db_path = cli
        .database
        .clone()
        .unwrap_or_else(|| config.storage.path.clone());
    let store = Store::open_with_options(&db_path, &config.storage.store_options())
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Add {
            tag,
            timestamp,
            value,
            tier,
        } => cmd_add(&store, &tag, &timestamp, value, tier),
        Commands::Query {
            tag,
            range,
            tier,
            limit,
            newest_first,
            format,
        } => cmd_query(
            &store,
            &mut out,
            &QueryArgs {
                tag,
                range,
                tier,
                limit,
                newest_first,
                format,
            },
        ),
        Commands::Delete { tag, range } => cmd_delete(&store, &mut out, &tag, &range),
        Commands::FirstAfter { timestamp } => cmd_first_after(&store, &mut out, &timestamp),
        Commands::Info => cmd_info(&store, &mut out, &db_path),
    }
}
