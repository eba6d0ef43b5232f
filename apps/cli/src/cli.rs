use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(name = "acai", version, about = "Açaí shop pricing and catalog reports")]
pub struct Cli {
    /// Configuration file path (default: platform config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Load the sample catalog
    Seed {
        /// Replace a catalog that already has data
        #[arg(short, long)]
        force: bool,
    },

    /// Entity counts and overall margin
    Summary,

    /// Per-category price, cost and margin averages
    Stats,

    /// Margin and supplier alerts
    Alerts,

    /// Supplier ranking per ingredient
    Suppliers,

    /// Suggest a sale price for a cost
    Suggest {
        /// Unit cost in reais (4.40 or 4,40)
        #[arg(long, value_parser = parse_amount)]
        cost: Decimal,

        /// Target margin in percent (default: [pricing].target_margin)
        #[arg(long)]
        margin: Option<Decimal>,
    },

    /// Compare prices for a cost at several margins
    Scenarios {
        /// Unit cost in reais
        #[arg(long, value_parser = parse_amount)]
        cost: Decimal,

        /// Comma-separated margins (default: [pricing].scenario_margins)
        #[arg(long, value_delimiter = ',')]
        margins: Vec<Decimal>,
    },

    /// Menu items with cost, markup and margin
    Menu {
        /// Include deactivated items
        #[arg(short, long)]
        all: bool,
    },

    /// Cups sold outside the menu, with cost, markup and margin
    Cups {
        /// Include deactivated cups
        #[arg(short, long)]
        all: bool,
    },

    /// Print the stored catalog snapshot as JSON
    Export,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration file and environment
    Validate,

    /// Print the default config file location
    Path,
}

/// Accepts both `4.40` and the Brazilian `4,40`.
fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let normalized = raw.trim().trim_start_matches("R$").trim().replace(',', ".");
    let amount: Decimal = normalized
        .parse()
        .map_err(|_| format!("'{}' is not an amount", raw))?;
    if amount.is_sign_negative() {
        return Err("amount must not be negative".to_string());
    }
    Ok(amount)
}
