//! `suppliers`: quote ranking per ingredient, priced per purchase.

use std::fmt::Write as _;

use acai_core::supplier::{self, SupplierComparison};
use acai_core::Catalog;

use super::{cell, cell_right, percent, Format};
use crate::error::AppResult;

pub fn suppliers(catalog: &Catalog, format: Format) -> AppResult<String> {
    let comparisons = supplier::compare_all(
        &catalog.ingredients,
        &catalog.supplier_prices,
        &catalog.suppliers,
    );
    format.render(comparisons.as_slice(), render)
}

fn render(comparisons: &[SupplierComparison]) -> String {
    if comparisons.is_empty() {
        return "No supplier quotes for active ingredients.".to_string();
    }

    let mut out = String::new();
    for c in comparisons {
        let _ = writeln!(
            out,
            "{}  (current {}, spread {})",
            c.ingredient_name,
            c.current_price,
            percent(c.price_spread_percent)
        );

        for (rank, quote) in c.ranking.iter().enumerate() {
            let default_mark = if quote.is_default { " [default]" } else { "" };
            let lead = quote
                .lead_time_days
                .map(|d| format!("{}d", d))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {}. {} {} {} {}{}",
                rank + 1,
                cell(&quote.supplier_name, 24),
                cell_right(&quote.package_price.to_string(), 11),
                cell_right(&format!("+{}", quote.difference_from_best), 12),
                cell_right(&lead, 4),
                default_mark,
            );
        }

        if c.economy.is_positive() {
            let _ = writeln!(
                out,
                "  → buying from {} saves {} per purchase ({})",
                c.best.supplier_name,
                c.economy,
                percent(c.economy_percent)
            );
        }
        let _ = writeln!(out);
    }
    out.trim_end().to_string()
}
