//! # Catalog Reports
//!
//! `summary`, `stats`, `menu`, `cups` and `alerts`. All margins are price-relative.

use std::fmt::Write as _;

use acai_core::alerts::{self, Alert, AlertThresholds};
use acai_core::stats::{self, CatalogSummary, CategoryStats, EntityCount, ItemReport};
use acai_core::Catalog;

use super::{cell, cell_right, percent, Format};
use crate::error::AppResult;

// =============================================================================
// summary
// =============================================================================

pub fn summary(catalog: &Catalog, format: Format) -> AppResult<String> {
    let summary = stats::summarize(catalog);
    format.render(&summary, render_summary)
}

fn render_summary(s: &CatalogSummary) -> String {
    let rows: [(&str, EntityCount); 7] = [
        ("Ingredients", s.ingredients),
        ("Packaging", s.packaging),
        ("Recipes", s.recipes),
        ("Cups", s.products),
        ("Menu items", s.menu_items),
        ("Suppliers", s.suppliers),
        ("Supplier quotes", s.supplier_prices),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "{} {}", cell("", 16), cell_right("active / total", 14));
    for (label, count) in rows {
        let _ = writeln!(
            out,
            "{} {}",
            cell(label, 16),
            cell_right(&format!("{} / {}", count.active, count.total), 14)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Average menu margin: {}", percent(s.average_margin));
    let _ = writeln!(out, "Items sold at a loss: {}", s.items_at_loss);
    let _ = write!(out, "Items with cost gaps: {}", s.items_with_gaps);
    out
}

// =============================================================================
// stats
// =============================================================================

pub fn category_stats(catalog: &Catalog, format: Format) -> AppResult<String> {
    let stats = stats::category_stats(catalog);
    format.render(stats.as_slice(), render_category_stats)
}

fn render_category_stats(rows: &[CategoryStats]) -> String {
    if rows.is_empty() {
        return "No active menu items.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {} {} {} {} {}",
        cell("Category", 10),
        cell_right("Items", 5),
        cell_right("Avg price", 11),
        cell_right("Avg cost", 11),
        cell_right("Avg margin", 10),
        cell_right("Lowest", 8),
        cell_right("Highest", 8),
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{} {} {} {} {} {} {}",
            cell(&row.category.to_string(), 10),
            cell_right(&row.item_count.to_string(), 5),
            cell_right(&row.average_price.to_string(), 11),
            cell_right(&row.average_cost.to_string(), 11),
            cell_right(&percent(row.average_margin), 10),
            cell_right(&percent(row.lowest_margin), 8),
            cell_right(&percent(row.highest_margin), 8),
        );
    }
    out.trim_end().to_string()
}

// =============================================================================
// menu
// =============================================================================

/// Menu items with their computed cost. Inactive items only with `all`.
pub fn menu(catalog: &Catalog, all: bool, format: Format) -> AppResult<String> {
    let reports: Vec<ItemReport> = stats::menu_report(catalog)
        .into_iter()
        .filter(|r| all || r.active)
        .collect();
    format.render(reports.as_slice(), render_menu)
}

/// Cups priced on their own, same columns as the menu.
pub fn cups(catalog: &Catalog, all: bool, format: Format) -> AppResult<String> {
    let reports: Vec<ItemReport> = stats::product_report(catalog)
        .into_iter()
        .filter(|r| all || r.active)
        .collect();
    if reports.is_empty() && format == Format::Text {
        return Ok("No cups.".to_string());
    }
    format.render(reports.as_slice(), render_menu)
}

fn render_menu(rows: &[ItemReport]) -> String {
    if rows.is_empty() {
        return "No menu items.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {} {} {} {}",
        cell("Item", 28),
        cell("Category", 8),
        cell_right("Price", 11),
        cell_right("Cost", 11),
        cell_right("Markup", 11),
        cell_right("Margin", 8),
    );
    for row in rows {
        let mut name = row.name.clone();
        if !row.active {
            name.push_str(" (off)");
        }
        let category = row.category.map(|c| c.to_string()).unwrap_or_default();
        let flag = if row.gaps.is_empty() { "" } else { " *" };

        let _ = writeln!(
            out,
            "{} {} {} {} {} {}{}",
            cell(&name, 28),
            cell(&category, 8),
            cell_right(&row.analysis.price.to_string(), 11),
            cell_right(&row.analysis.cost.to_string(), 11),
            cell_right(&row.analysis.markup.to_string(), 11),
            cell_right(&percent(row.analysis.margin), 8),
            flag,
        );
    }

    if rows.iter().any(|r| !r.gaps.is_empty()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "* cost is incomplete:");
        for row in rows.iter().filter(|r| !r.gaps.is_empty()) {
            for gap in &row.gaps {
                let _ = writeln!(out, "  {}: {} is {:?}", row.name, gap.source, gap.reason);
            }
        }
    }
    out.trim_end().to_string()
}

// =============================================================================
// alerts
// =============================================================================

pub fn alerts(catalog: &Catalog, thresholds: &AlertThresholds, format: Format) -> AppResult<String> {
    let raised = alerts::scan(catalog, thresholds);
    format.render(raised.as_slice(), render_alerts)
}

fn render_alerts(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "✓ No alerts.".to_string();
    }

    let mut out = String::new();
    for alert in alerts {
        let _ = writeln!(out, "[{}] {}", alert.severity.to_string().to_uppercase(), alert.title);
        let _ = writeln!(out, "  {}", alert.message);
        if !alert.affected.is_empty() {
            let _ = writeln!(out, "  Affected: {}", alert.affected.join(", "));
        }
        let _ = writeln!(out, "  → {}", alert.action);
        let _ = writeln!(out);
    }
    out.trim_end().to_string()
}
