//! # Statistics
//!
//! Per-item cost reports, per-category aggregates and a catalog summary.
//! All margins here are price-relative (see [`crate::pricing::margin`]).

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::costing::{self, CostGap};
use crate::money::{saturating_div, saturating_sum, Money};
use crate::pricing::PriceAnalysis;
use crate::types::MenuCategory;

// =============================================================================
// Item Reports
// =============================================================================

/// Cost and margin of one priced item (menu item or cup).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReport {
    pub id: String,
    pub name: String,
    /// Set for menu items, `None` for cups.
    pub category: Option<MenuCategory>,
    pub active: bool,
    pub analysis: PriceAnalysis,
    /// References that were priced at zero.
    pub gaps: Vec<CostGap>,
}

impl ItemReport {
    pub fn margin(&self) -> Decimal {
        self.analysis.margin
    }
}

/// One report per menu item, in catalog order.
pub fn menu_report(catalog: &Catalog) -> Vec<ItemReport> {
    catalog
        .menu_items
        .iter()
        .map(|item| {
            let breakdown = costing::menu_item_cost(catalog, item);
            ItemReport {
                id: item.id.clone(),
                name: item.name.clone(),
                category: Some(item.category),
                active: item.active,
                analysis: PriceAnalysis::new(breakdown.total, item.sale_price),
                gaps: breakdown.gaps,
            }
        })
        .collect()
}

/// One report per cup, in catalog order.
pub fn product_report(catalog: &Catalog) -> Vec<ItemReport> {
    catalog
        .products
        .iter()
        .map(|product| {
            let breakdown = costing::product_cost(catalog, product);
            ItemReport {
                id: product.id.clone(),
                name: product.name.clone(),
                category: None,
                active: product.active,
                analysis: PriceAnalysis::new(breakdown.total, product.sale_price),
                gaps: breakdown.gaps,
            }
        })
        .collect()
}

// =============================================================================
// Category Statistics
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category: MenuCategory,
    pub item_count: usize,
    pub average_price: Money,
    pub average_cost: Money,
    pub average_margin: Decimal,
    pub lowest_margin: Decimal,
    pub highest_margin: Decimal,
}

/// Aggregates over active menu items, one entry per non-empty category in
/// menu order.
pub fn category_stats(catalog: &Catalog) -> Vec<CategoryStats> {
    let reports: Vec<ItemReport> = menu_report(catalog)
        .into_iter()
        .filter(|r| r.active)
        .collect();

    MenuCategory::ALL
        .iter()
        .filter_map(|&category| {
            let items: Vec<&ItemReport> = reports
                .iter()
                .filter(|r| r.category == Some(category))
                .collect();
            stats_for(category, &items)
        })
        .collect()
}

fn stats_for(category: MenuCategory, items: &[&ItemReport]) -> Option<CategoryStats> {
    let first = items.first()?;
    let count = Decimal::from(items.len());

    let total_price: Money = items.iter().map(|r| r.analysis.price).sum();
    let total_cost: Money = items.iter().map(|r| r.analysis.cost).sum();
    let total_margin = saturating_sum(items.iter().map(|r| r.margin()));

    let (lowest, highest) = items.iter().fold(
        (first.margin(), first.margin()),
        |(lo, hi), r| (lo.min(r.margin()), hi.max(r.margin())),
    );

    Some(CategoryStats {
        category,
        item_count: items.len(),
        average_price: total_price.per_unit(count),
        average_cost: total_cost.per_unit(count),
        average_margin: saturating_div(total_margin, count),
        lowest_margin: lowest,
        highest_margin: highest,
    })
}

// =============================================================================
// Catalog Summary
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EntityCount {
    pub total: usize,
    pub active: usize,
}

impl EntityCount {
    fn of<T>(items: &[T], active: impl Fn(&T) -> bool) -> Self {
        EntityCount {
            total: items.len(),
            active: items.iter().filter(|i| active(*i)).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub ingredients: EntityCount,
    pub packaging: EntityCount,
    pub recipes: EntityCount,
    pub products: EntityCount,
    pub menu_items: EntityCount,
    pub suppliers: EntityCount,
    pub supplier_prices: EntityCount,
    /// Mean margin over active menu items; 0 without any.
    pub average_margin: Decimal,
    /// Active menu items sold below cost.
    pub items_at_loss: usize,
    /// Active menu items whose cost has gaps.
    pub items_with_gaps: usize,
}

pub fn summarize(catalog: &Catalog) -> CatalogSummary {
    let active_reports: Vec<ItemReport> = menu_report(catalog)
        .into_iter()
        .filter(|r| r.active)
        .collect();

    let average_margin = if active_reports.is_empty() {
        Decimal::ZERO
    } else {
        saturating_div(
            saturating_sum(active_reports.iter().map(|r| r.margin())),
            Decimal::from(active_reports.len()),
        )
    };

    CatalogSummary {
        ingredients: EntityCount::of(&catalog.ingredients, |i| i.active),
        packaging: EntityCount::of(&catalog.packaging, |p| p.active),
        recipes: EntityCount::of(&catalog.recipes, |r| r.active),
        products: EntityCount::of(&catalog.products, |p| p.active),
        menu_items: EntityCount::of(&catalog.menu_items, |m| m.active),
        suppliers: EntityCount::of(&catalog.suppliers, |s| s.active),
        supplier_prices: EntityCount::of(&catalog.supplier_prices, |q| q.available),
        average_margin,
        items_at_loss: active_reports.iter().filter(|r| r.analysis.is_loss()).count(),
        items_with_gaps: active_reports.iter().filter(|r| !r.gaps.is_empty()).count(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
