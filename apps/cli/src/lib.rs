//! # acai-cli: Command Line Front End
//!
//! Wires configuration, logging and storage around `acai-core`.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. Parse arguments (clap)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Initialize logging (tracing, RUST_LOG, stderr)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Load config: defaults ◄── acai.toml ◄── ACAI_* env                  │
//! │       │                                                                 │
//! │       ├── config / suggest / scenarios ──► no database needed           │
//! │       ▼                                                                 │
//! │  4. Open database + migrations, load snapshot (CatalogStore)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. Run subcommand, print report to stdout                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use acai_db::{CatalogStore, Database, DbConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{catalog, pricing, reports, suppliers, Format};
use config::AppConfig;
use error::AppResult;

/// Initializes the logging system.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - otherwise `info` overall, `debug` for our crates, `warn` for sqlx
///
/// Logs go to stderr so reports on stdout stay pipeable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,acai=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one invocation and returns what should be printed.
pub async fn run(cli: Cli) -> AppResult<String> {
    let config = AppConfig::load(cli.config.clone())?;
    let format = Format::from_flag(cli.json);

    match &cli.command {
        Commands::Config { action } => commands::config::run(action, &config, format),
        Commands::Suggest { cost, margin } => pricing::suggest(
            *cost,
            margin.unwrap_or(config.pricing.target_margin),
            format,
        ),
        Commands::Scenarios { cost, margins } => {
            let margins = if margins.is_empty() {
                config.pricing.scenario_margins.as_slice()
            } else {
                margins.as_slice()
            };
            pricing::scenarios(*cost, margins, format)
        }
        command => {
            let (db, store) = open_store(&config).await?;
            let output = execute(command, &store, &config, format).await;
            db.close().await;
            output
        }
    }
}

/// Opens the configured database and loads the catalog snapshot.
pub async fn open_store(config: &AppConfig) -> AppResult<(Database, CatalogStore)> {
    let path = &config.storage.db_path;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::new(DbConfig::new(path)).await?;
    let store = CatalogStore::open(db.clone(), config.storage.storage_key.clone()).await?;

    info!(path = %path.display(), key = %store.key(), "Catalog opened");
    Ok((db, store))
}

/// Runs a subcommand that reads or writes the catalog.
pub async fn execute(
    command: &Commands,
    store: &CatalogStore,
    config: &AppConfig,
    format: Format,
) -> AppResult<String> {
    debug!(?command, "Executing command");

    if let Commands::Seed { force } = command {
        return catalog::seed(store, *force, format).await;
    }

    let snapshot = store.snapshot().await;
    match command {
        Commands::Summary => reports::summary(&snapshot, format),
        Commands::Stats => reports::category_stats(&snapshot, format),
        Commands::Menu { all } => reports::menu(&snapshot, *all, format),
        Commands::Cups { all } => reports::cups(&snapshot, *all, format),
        Commands::Alerts => reports::alerts(&snapshot, &config.alerts, format),
        Commands::Suppliers => suppliers::suppliers(&snapshot, format),
        Commands::Export => catalog::export(&snapshot),
        Commands::Seed { .. }
        | Commands::Suggest { .. }
        | Commands::Scenarios { .. }
        | Commands::Config { .. } => Err(error::AppError::config(format!(
            "{:?} does not use the catalog",
            command
        ))),
    }
}
