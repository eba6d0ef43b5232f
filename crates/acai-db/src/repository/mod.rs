//! # Repository Module
//!
//! Database repository implementations.
//!
//! ```text
//! CatalogStore / seed binary
//!      │
//!      │  db.snapshots().load_or_empty("acai-pricing-data")
//!      ▼
//! SnapshotRepository
//! ├── load(&self, key)
//! ├── load_or_empty(&self, key)
//! ├── save(&self, key, catalog)
//! ├── updated_at(&self, key)
//! └── delete(&self, key)
//!      │
//!      ▼
//! app_state (SQLite)
//! ```
//!
//! ## Available Repositories
//!
//! - [`SnapshotRepository`](snapshot::SnapshotRepository) - Catalog blob by key

pub mod snapshot;
