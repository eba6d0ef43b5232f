//! # acai-core: Pure Pricing Logic for the Açaí Shop
//!
//! This crate holds every pricing and catalog rule as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Açaí Pricing Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    acai CLI (apps/cli)                          │   │
//! │  │    summary, stats, alerts, suppliers, suggest, scenarios        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ acai-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  types   │ │ pricing  │ │ costing  │ │ catalog  │          │   │
//! │  │   │ Recipe   │ │ margin   │ │ line     │ │ snapshot │          │   │
//! │  │   │ MenuItem │ │ markup   │ │ items    │ │ commands │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │ supplier │ │  psych.  │ │  stats   │ │  alerts  │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    acai-db (Storage Layer)                      │   │
//! │  │        SQLite key/value snapshot, migrations, catalog store     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Ingredient, Recipe, Product, MenuItem, ...)
//! - [`money`] - Exact decimal money in reais
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules for catalog commands
//! - [`pricing`] - Margin, markup, price for margin, scenarios
//! - [`costing`] - Composite cost aggregation
//! - [`supplier`] - Best supplier quote and savings
//! - [`psychological`] - Attractive price suggestions
//! - [`stats`] - Per-category statistics and catalog summary
//! - [`alerts`] - Threshold scanner
//! - [`catalog`] - Immutable catalog snapshots and commands
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output; ids and timestamps are the
//!    only values generated inside the crate
//! 2. **No I/O**: persistence lives in `acai-db`
//! 3. **Exact Money**: decimal amounts, rounded only for display
//! 4. **No Panics**: zero denominators yield zero, impossible margins yield
//!    a typed error
//!
//! ## Example Usage
//!
//! ```rust
//! use acai_core::money::Money;
//! use acai_core::pricing::{margin, price_for_margin};
//! use rust_decimal::Decimal;
//!
//! let cost = Money::from_cents(1000); // R$ 10,00
//! let price = price_for_margin(cost, Decimal::from(50)).unwrap();
//!
//! assert_eq!(price.cents(), 2000);
//! assert_eq!(margin(cost, price), Decimal::from(50));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod alerts;
pub mod catalog;
pub mod costing;
pub mod error;
pub mod money;
pub mod pricing;
pub mod psychological;
pub mod stats;
pub mod supplier;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Constants
// =============================================================================

/// Maximum characters in any entity name.
pub const MAX_NAME_LENGTH: usize = 120;

/// Key the catalog snapshot is stored under.
pub const STORAGE_KEY: &str = "acai-pricing-data";

/// Version written into every snapshot.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Margin (%) below which an item is flagged as critical.
pub const DEFAULT_CRITICAL_MARGIN: u32 = 30;

/// Margin (%) above which an item is flagged as a pricing opportunity.
pub const DEFAULT_OPPORTUNITY_MARGIN: u32 = 70;

/// Supplier price spread (%) above which switching suppliers is suggested.
pub const DEFAULT_SUPPLIER_SPREAD: u32 = 10;

/// Target margin (%) used when none is given.
pub const DEFAULT_TARGET_MARGIN: u32 = 60;
