//! # Subcommands
//!
//! Every subcommand renders to a `String` so the binary only prints.
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────┐
//! │ Module       │ Subcommands                                  │
//! ├──────────────┼──────────────────────────────────────────────┤
//! │ catalog      │ seed, export                                 │
//! │ reports      │ summary, stats, menu, alerts                 │
//! │ suppliers    │ suppliers                                    │
//! │ pricing      │ suggest, scenarios                           │
//! │ config       │ config show / validate / path                │
//! └──────────────┴──────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod pricing;
pub mod reports;
pub mod suppliers;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::AppResult;

/// Output format selected by `--json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Format::Json
        } else {
            Format::Text
        }
    }

    /// Pretty JSON of `value`, or the text produced by `text`.
    pub(crate) fn render<T, F>(self, value: &T, text: F) -> AppResult<String>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        match self {
            Format::Json => Ok(serde_json::to_string_pretty(value)?),
            Format::Text => Ok(text(value)),
        }
    }
}

/// `57.4%`
pub(crate) fn percent(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}

/// Pads a cell to `width` characters (char-aware for accented names).
pub(crate) fn cell(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.chars().take(width).collect()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// Right-aligns a cell to `width` characters.
pub(crate) fn cell_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", " ".repeat(width - len), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(Decimal::from(50)), "50.0%");
        assert_eq!(percent(Decimal::new(5744, 2)), "57.4%");
    }

    #[test]
    fn test_cells_count_chars_not_bytes() {
        assert_eq!(cell("Açaí", 6), "Açaí  ");
        assert_eq!(cell("Granola crocante", 7), "Granola");
        assert_eq!(cell_right("R$ 4,40", 9), "  R$ 4,40");
    }
}
