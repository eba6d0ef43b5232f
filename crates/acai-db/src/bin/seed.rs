//! # Sample Data Loader
//!
//! Writes the sample catalog into a database for development and demos.
//!
//! ## Usage
//! ```bash
//! # Seed ./acai_dev.db under the default key
//! cargo run -p acai-db --bin seed
//!
//! # Specify database path
//! cargo run -p acai-db --bin seed -- --db ./data/acai.db
//!
//! # Overwrite an existing catalog
//! cargo run -p acai-db --bin seed -- --force
//! ```

use acai_core::STORAGE_KEY;
use acai_db::sample::{self, SeedOutcome};
use acai_db::{CatalogStore, Database, DbConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./acai_dev.db");
    let mut key = String::from(STORAGE_KEY);
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--key" | "-k" => {
                if i + 1 < args.len() {
                    key = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Açaí Pricing Sample Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./acai_dev.db)");
                println!("  -k, --key <KEY>    Storage key (default: {})", STORAGE_KEY);
                println!("  -f, --force        Overwrite a non-empty catalog");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    println!("🌱 Açaí Pricing Sample Data Loader");
    println!("==================================");
    println!("Database: {}", db_path);
    println!("Key:      {}", key);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let store = CatalogStore::open(db.clone(), key).await?;

    match sample::seed(&store, force).await? {
        SeedOutcome::Seeded {
            ingredients,
            menu_items,
        } => {
            println!(
                "✓ Sample catalog written: {} ingredients, {} menu items",
                ingredients, menu_items
            );
        }
        SeedOutcome::SkippedNonEmpty => {
            println!("⚠ Catalog already has data");
            println!("  Skipping seed to avoid overwriting it.");
            println!("  Run again with --force to replace it.");
        }
    }

    db.close().await;
    Ok(())
}
