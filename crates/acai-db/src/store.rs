//! # Catalog Store
//!
//! Owns the current catalog snapshot and mirrors every change to storage.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  store.apply(|c| c.delete_recipe(id))                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock writer (tokio Mutex) ──► run command on current snapshot          │
//! │       │                            │                                    │
//! │       │                            ├── Err(CoreError) ──► unchanged     │
//! │       │                            ▼                                    │
//! │       │                       save full snapshot ── Err ──► unchanged   │
//! │       │                            │                                    │
//! │       ▼                            ▼                                    │
//! │  swap Arc<Catalog>          readers see the new snapshot                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers clone the `Arc` and never wait for a write to finish storing.

use std::sync::Arc;

use acai_core::{Catalog, CoreResult};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::error::DbResult;
use crate::pool::Database;

pub struct CatalogStore {
    db: Database,
    key: String,
    current: RwLock<Arc<Catalog>>,
    writer: Mutex<()>,
}

impl CatalogStore {
    /// Loads the snapshot under `key` (empty if absent) and wraps it.
    pub async fn open(db: Database, key: impl Into<String>) -> DbResult<Self> {
        let key = key.into();
        let catalog = db.snapshots().load_or_empty(&key).await?;

        info!(
            key = %key,
            ingredients = catalog.ingredients.len(),
            menu_items = catalog.menu_items.len(),
            "Catalog store opened"
        );

        Ok(CatalogStore {
            db,
            key,
            current: RwLock::new(Arc::new(catalog)),
            writer: Mutex::new(()),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().await.clone()
    }

    /// Runs a command that also yields a value (e.g. the id of an added
    /// entity), persists the resulting snapshot and publishes it.
    pub async fn execute<T, F>(&self, command: F) -> DbResult<T>
    where
        F: FnOnce(&Catalog) -> CoreResult<(Catalog, T)>,
    {
        let _writer = self.writer.lock().await;

        let base = self.snapshot().await;
        let (next, output) = command(&base)?;

        self.db.snapshots().save(&self.key, &next).await?;
        *self.current.write().await = Arc::new(next);

        debug!(key = %self.key, "Catalog change persisted");
        Ok(output)
    }

    /// Runs a command returning only the new snapshot.
    pub async fn apply<F>(&self, command: F) -> DbResult<()>
    where
        F: FnOnce(&Catalog) -> CoreResult<Catalog>,
    {
        self.execute(|catalog| command(catalog).map(|next| (next, ())))
            .await
    }

    /// Replaces the whole catalog (sample data, imports).
    pub async fn replace(&self, catalog: Catalog) -> DbResult<()> {
        self.execute(move |_| Ok((catalog, ()))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use crate::DbError;
    use acai_core::{CoreError, SupplierDraft, STORAGE_KEY};

    fn supplier(name: &str) -> SupplierDraft {
        SupplierDraft {
            name: name.to_string(),
            contact: Some("(91) 99999-0000".to_string()),
            active: true,
        }
    }

    #[tokio::test]
    async fn test_changes_are_persisted() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = CatalogStore::open(db.clone(), STORAGE_KEY).await.unwrap();
        assert!(store.snapshot().await.is_empty());

        let id = store
            .execute(|c| c.add_supplier(supplier("Distribuidora Norte")))
            .await
            .unwrap();

        let stored = db.snapshots().load(STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(stored.supplier(&id).unwrap().name, "Distribuidora Norte");
        assert_eq!(*store.snapshot().await, stored);
    }

    #[tokio::test]
    async fn test_failed_command_changes_nothing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = CatalogStore::open(db.clone(), STORAGE_KEY).await.unwrap();
        store
            .execute(|c| c.add_supplier(supplier("Norte")))
            .await
            .unwrap();
        let before = store.snapshot().await;

        let err = store.apply(|c| c.delete_supplier("missing")).await;
        assert!(matches!(err, Err(DbError::Core(CoreError::NotFound { .. }))));
        assert!(Arc::ptr_eq(&before, &store.snapshot().await));
    }

    #[tokio::test]
    async fn test_reopen_sees_previous_writes() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        {
            let store = CatalogStore::open(db.clone(), STORAGE_KEY).await.unwrap();
            store
                .execute(|c| c.add_supplier(supplier("Norte")))
                .await
                .unwrap();
        }

        let reopened = CatalogStore::open(db, STORAGE_KEY).await.unwrap();
        assert_eq!(reopened.snapshot().await.suppliers.len(), 1);
    }
}
