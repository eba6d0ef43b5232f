//! `seed` and `export`.

use acai_core::Catalog;
use acai_db::sample::{self, SeedOutcome};
use acai_db::CatalogStore;
use serde::Serialize;

use super::Format;
use crate::error::AppResult;

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum SeedReport {
    Seeded { ingredients: usize, menu_items: usize },
    Skipped,
}

pub async fn seed(store: &CatalogStore, force: bool, format: Format) -> AppResult<String> {
    let report = match sample::seed(store, force).await? {
        SeedOutcome::Seeded {
            ingredients,
            menu_items,
        } => SeedReport::Seeded {
            ingredients,
            menu_items,
        },
        SeedOutcome::SkippedNonEmpty => SeedReport::Skipped,
    };

    format.render(&report, |r| match r {
        SeedReport::Seeded {
            ingredients,
            menu_items,
        } => format!(
            "✓ Sample catalog written: {} ingredients, {} menu items",
            ingredients, menu_items
        ),
        SeedReport::Skipped => {
            "⚠ Catalog already has data, nothing written (use --force to replace it)".to_string()
        }
    })
}

/// The snapshot exactly as stored, for backups and other tools.
pub fn export(catalog: &Catalog) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(catalog)?)
}
