//! # CLI Error Type
//!
//! Unified error type for subcommands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  acai alerts                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Config error? ──── bad TOML / threshold ──────┐                        │
//! │       │                                        │                        │
//! │       ▼                                        ▼                        │
//! │  Storage error? ─── DbError ─────────────► AppError ──► stderr          │
//! │       │                                        ▲        "error[CODE]"   │
//! │       ▼                                        │        exit 1          │
//! │  Catalog error? ─── CoreError ─────────────────┘                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Report ──► stdout                                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use acai_core::{CoreError, ValidationError};
use acai_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        AppError::Config(message.into())
    }

    /// Machine-readable code printed next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Core(e) | AppError::Db(DbError::Core(e)) => match e {
                CoreError::NotFound { .. } => "NOT_FOUND",
                CoreError::InUse { .. } => "IN_USE",
                CoreError::UnreachableMargin { .. }
                | CoreError::Overflow { .. }
                | CoreError::Validation(_) => {
                    "VALIDATION_ERROR"
                }
            },
            AppError::Db(_) => "DATABASE_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "INTERNAL",
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Invalid configuration values surface as config errors, not catalog ones.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
