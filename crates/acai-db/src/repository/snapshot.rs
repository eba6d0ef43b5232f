//! # Snapshot Repository
//!
//! Stores the whole catalog as one JSON document per key.
//!
//! ```text
//! app_state
//! ┌─────────────────────┬──────────────────────────────────┬──────────────┐
//! │ key                 │ value                            │ updated_at   │
//! ├─────────────────────┼──────────────────────────────────┼──────────────┤
//! │ acai-pricing-data   │ {"schema_version":1,             │ 2026-10-19…  │
//! │                     │  "packaging":[…],"ingredients":[…│              │
//! │                     │  …,"supplier_prices":[…]}        │              │
//! └─────────────────────┴──────────────────────────────────┴──────────────┘
//! ```
//!
//! A missing key is an empty catalog, not an error.

use acai_core::{Catalog, SNAPSHOT_SCHEMA_VERSION};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Loads the snapshot stored under `key`, if any.
    ///
    /// ## Errors
    /// - [`DbError::Serialization`] when the blob is not a catalog
    /// - [`DbError::UnsupportedSchema`] when it was written by a newer version
    pub async fn load(&self, key: &str) -> DbResult<Option<Catalog>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM app_state WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        let Some(json) = value else {
            debug!(key = %key, "No snapshot stored");
            return Ok(None);
        };

        let catalog: Catalog = serde_json::from_str(&json)?;
        if catalog.schema_version > SNAPSHOT_SCHEMA_VERSION {
            return Err(DbError::UnsupportedSchema {
                found: catalog.schema_version,
                supported: SNAPSHOT_SCHEMA_VERSION,
            });
        }

        debug!(
            key = %key,
            ingredients = catalog.ingredients.len(),
            menu_items = catalog.menu_items.len(),
            "Snapshot loaded"
        );
        Ok(Some(catalog))
    }

    /// Like [`load`](Self::load), with an empty catalog for a missing key.
    pub async fn load_or_empty(&self, key: &str) -> DbResult<Catalog> {
        Ok(self.load(key).await?.unwrap_or_default())
    }

    /// Writes the full snapshot under `key`, replacing what was there.
    pub async fn save(&self, key: &str, catalog: &Catalog) -> DbResult<()> {
        let json = serde_json::to_string(catalog)?;
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO app_state (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(&json)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = json.len(), "Snapshot saved");
        Ok(())
    }

    /// When the snapshot under `key` was last written.
    pub async fn updated_at(&self, key: &str) -> DbResult<Option<DateTime<Utc>>> {
        let ts: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT updated_at FROM app_state WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(ts)
    }

    /// Removes the snapshot. Returns whether anything was deleted.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM app_state WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use acai_core::{IngredientDraft, IngredientKind, Money, STORAGE_KEY};
    use rust_decimal::Decimal;

    async fn repo() -> SnapshotRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().snapshots()
    }

    fn one_ingredient() -> Catalog {
        let (catalog, _) = Catalog::new()
            .add_ingredient(IngredientDraft {
                name: "Granola".to_string(),
                kind: IngredientKind::Topping,
                quantity_grams: Decimal::from(1000),
                price_paid: Money::from_cents(1800),
                nominal_price: Money::from_cents(1800),
                active: true,
            })
            .unwrap();
        catalog
    }

    #[tokio::test]
    async fn test_missing_key_is_empty_catalog() {
        let repo = repo().await;
        assert!(repo.load(STORAGE_KEY).await.unwrap().is_none());
        assert!(repo.load_or_empty(STORAGE_KEY).await.unwrap().is_empty());
        assert!(repo.updated_at(STORAGE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let repo = repo().await;
        let catalog = one_ingredient();

        repo.save(STORAGE_KEY, &catalog).await.unwrap();
        assert_eq!(repo.load(STORAGE_KEY).await.unwrap(), Some(catalog.clone()));
        assert!(repo.updated_at(STORAGE_KEY).await.unwrap().is_some());

        // Overwrite in place
        let empty = catalog.delete_ingredient(&catalog.ingredients[0].id).unwrap();
        repo.save(STORAGE_KEY, &empty).await.unwrap();
        assert!(repo.load_or_empty(STORAGE_KEY).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let repo = repo().await;
        repo.save("other", &one_ingredient()).await.unwrap();
        assert!(repo.load(STORAGE_KEY).await.unwrap().is_none());
        assert!(repo.delete("other").await.unwrap());
        assert!(!repo.delete("other").await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_reported() {
        let repo = repo().await;
        sqlx::query("INSERT INTO app_state (key, value, updated_at) VALUES (?1, ?2, ?3)")
            .bind(STORAGE_KEY)
            .bind("{\"ingredients\": 42}")
            .bind(Utc::now())
            .execute(&repo.pool)
            .await
            .unwrap();

        assert!(matches!(
            repo.load(STORAGE_KEY).await,
            Err(DbError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_newer_schema_is_rejected() {
        let repo = repo().await;
        let mut catalog = Catalog::new();
        catalog.schema_version = SNAPSHOT_SCHEMA_VERSION + 1;
        repo.save(STORAGE_KEY, &catalog).await.unwrap();

        assert!(matches!(
            repo.load(STORAGE_KEY).await,
            Err(DbError::UnsupportedSchema { .. })
        ));
    }
}
