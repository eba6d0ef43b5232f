//! # Error Types
//!
//! Domain-specific error types for acai-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  acai-core errors (this file)                                          │
//! │  ├── CoreError        - Catalog and pricing rule violations            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  acai-db errors (separate crate)                                       │
//! │  └── DbError          - Storage failures                               │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → AppError → terminal     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog and pricing errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An id does not resolve to an entity of the expected type.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Deletion refused because other entities still reference this one.
    ///
    /// ## User Workflow
    /// ```text
    /// delete_ingredient("granola")
    ///      │
    ///      ▼
    /// referenced by: Creme de ninho (recipe), Copo 500ml (product)
    ///      │
    ///      ▼
    /// InUse { entity: "Ingredient", id, used_by: [...] }
    ///      │
    ///      ▼
    /// UI shows: "Ingredient granola is still used by: ..."
    /// ```
    #[error("{entity} {id} is still used by: {}", .used_by.join(", "))]
    InUse {
        entity: &'static str,
        id: String,
        used_by: Vec<String>,
    },

    /// No finite price yields the requested margin.
    ///
    /// `price = cost / (1 - margin/100)` only works for margins in [0, 100).
    #[error("A margin of {margin}% cannot be reached; use a value from 0 up to (not including) 100")]
    UnreachableMargin { margin: Decimal },

    /// A computed amount does not fit in a decimal.
    #[error("Amount out of range in {operation}")]
    Overflow { operation: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, surfaced as inline form messages.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// Two fields are inconsistent (e.g. discounted price above gross price).
    #[error("{field} {reason}")]
    Inconsistent { field: String, reason: String },

    /// Duplicate value (e.g. the same ingredient twice in a recipe).
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
