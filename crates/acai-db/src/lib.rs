//! # acai-db: Storage Layer for the Açaí Pricing Engine
//!
//! Persists the catalog as one JSON snapshot in a local SQLite database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Açaí Pricing Data Flow                           │
//! │                                                                         │
//! │  CLI command (acai alerts)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     acai-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ CatalogStore  │    │  Snapshot     │    │  Migrations  │  │   │
//! │  │   │ (store.rs)    │───►│  Repository   │    │  (embedded)  │  │   │
//! │  │   │ Arc<Catalog>  │    │ load / save   │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                                │   │
//! │  │   ┌───────────────┐    ┌───────▼───────┐                       │   │
//! │  │   │ sample.rs     │    │   Database    │                       │   │
//! │  │   │ demo catalog  │    │  (pool.rs)    │                       │   │
//! │  │   └───────────────┘    └───────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite: app_state['acai-pricing-data'] = {"schema_version":1,...}     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Snapshot repository
//! - [`store`] - In-memory snapshot mirrored to storage
//! - [`sample`] - Sample catalog and seeding
//!
//! ## Usage
//!
//! ```rust,ignore
//! use acai_core::STORAGE_KEY;
//! use acai_db::{CatalogStore, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("acai.db")).await?;
//! let store = CatalogStore::open(db, STORAGE_KEY).await?;
//!
//! store.apply(|c| c.delete_menu_item(&id)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod sample;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::snapshot::SnapshotRepository;
pub use store::CatalogStore;
