//! # Supplier Comparison
//!
//! Ranks supplier quotes for one ingredient and measures the saving over
//! what the shop currently pays.
//!
//! Quotes come in their own [`PurchaseUnit`]; before ranking, each one is
//! scaled to the ingredient's purchase quantity so that it compares with the
//! nominal price. A 400 g can at R$ 16,00 against a quote of R$ 36,00/kg
//! compares R$ 16,00 with R$ 14,40.
//!
//! ```text
//! quotes for "Polpa de açaí" (1 kg)      current nominal price R$ 22,00
//!
//!   Distribuidora Norte   R$ 19,50  ◄── best      difference R$ 0,00
//!   Frutas do Pará        R$ 20,00                difference R$ 0,50
//!   Atacadão (inactive)   R$ 18,00  ✗ skipped
//!   Polpa Real (n/a)      R$ 17,00  ✗ skipped (not available)
//!
//!   economy         = max(0, 22,00 − 19,50) = R$ 2,50
//!   economy percent = 2,50 / 22,00         ≈ 11,36%
//!   spread          = (20,00 − 19,50) / 20,00 = 2,5%
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::money::Money;
use crate::types::{Ingredient, PurchaseUnit, Supplier, SupplierPrice};

/// One eligible quote with its distance from the best one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedQuote {
    pub price_id: String,
    pub supplier_id: String,
    pub supplier_name: String,
    pub gross_price: Money,
    pub discounted_price: Money,
    pub unit: PurchaseUnit,
    /// `discounted_price` for the ingredient's purchase quantity.
    pub package_price: Money,
    /// `package_price − best`, never negative.
    pub difference_from_best: Money,
    pub is_default: bool,
    pub lead_time_days: Option<u32>,
}

/// Outcome of comparing every eligible quote for one ingredient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierComparison {
    pub ingredient_id: String,
    pub ingredient_name: String,
    /// Nominal price of one purchase of the ingredient.
    pub current_price: Money,
    pub best: RankedQuote,
    /// `max(0, current − best)`.
    pub economy: Money,
    pub economy_percent: Decimal,
    /// Cheapest first; ties broken by supplier id.
    pub ranking: Vec<RankedQuote>,
    pub price_spread_percent: Decimal,
}

impl SupplierComparison {
    /// True when at least two suppliers can deliver.
    pub fn has_alternatives(&self) -> bool {
        self.ranking.len() > 1
    }
}

/// Compares the quotes for `ingredient` found in `quotes`.
///
/// Only quotes that are available and whose supplier exists and is active
/// are considered. Returns `None` when nothing is eligible.
pub fn compare_suppliers(
    ingredient: &Ingredient,
    quotes: &[SupplierPrice],
    suppliers: &[Supplier],
) -> Option<SupplierComparison> {
    let active: HashMap<&str, &Supplier> = suppliers
        .iter()
        .filter(|s| s.active)
        .map(|s| (s.id.as_str(), s))
        .collect();

    let mut eligible: Vec<(&SupplierPrice, &Supplier, Money)> = quotes
        .iter()
        .filter(|q| q.ingredient_id == ingredient.id && q.available)
        .filter_map(|q| {
            active
                .get(q.supplier_id.as_str())
                .map(|s| (q, *s, package_price(ingredient, q)))
        })
        .collect();

    eligible.sort_by(|(a, _, a_price), (b, _, b_price)| {
        a_price
            .cmp(b_price)
            .then_with(|| a.supplier_id.cmp(&b.supplier_id))
    });

    let best_price = eligible.first()?.2;

    let ranking: Vec<RankedQuote> = eligible
        .iter()
        .map(|(quote, supplier, price)| RankedQuote {
            price_id: quote.id.clone(),
            supplier_id: quote.supplier_id.clone(),
            supplier_name: supplier.name.clone(),
            gross_price: quote.gross_price,
            discounted_price: quote.discounted_price,
            unit: quote.unit,
            package_price: *price,
            difference_from_best: *price - best_price,
            is_default: quote.is_default,
            lead_time_days: quote.lead_time_days,
        })
        .collect();

    let current_price = ingredient.nominal_price;
    let economy = (current_price - best_price).max(Money::zero());
    let spread = price_spread_percent(ranking.iter().map(|r| r.package_price));

    Some(SupplierComparison {
        ingredient_id: ingredient.id.clone(),
        ingredient_name: ingredient.name.clone(),
        current_price,
        best: ranking[0].clone(),
        economy,
        economy_percent: economy.percent_of(current_price),
        ranking,
        price_spread_percent: spread,
    })
}

/// The quote's discounted price for `ingredient.quantity_grams`.
///
/// Per-package quotes (`Unit`, `Box`) are taken as they are.
pub fn package_price(ingredient: &Ingredient, quote: &SupplierPrice) -> Money {
    match quote.unit.grams() {
        Some(grams) => quote
            .discounted_price
            .multiply_quantity(ingredient.quantity_grams)
            .per_unit(grams)
            .rounded(),
        None => quote.discounted_price,
    }
}

/// Compares quotes for every active ingredient that has at least one
/// eligible quote, in ingredient order.
pub fn compare_all(
    ingredients: &[Ingredient],
    quotes: &[SupplierPrice],
    suppliers: &[Supplier],
) -> Vec<SupplierComparison> {
    ingredients
        .iter()
        .filter(|i| i.active)
        .filter_map(|i| compare_suppliers(i, quotes, suppliers))
        .collect()
}

/// `(highest − lowest) / highest × 100`; 0 for fewer than two prices or a
/// zero highest price.
///
/// ```rust
/// use acai_core::money::Money;
/// use acai_core::supplier::price_spread_percent;
/// use rust_decimal::Decimal;
///
/// let spread = price_spread_percent([Money::from_cents(900), Money::from_cents(1000)]);
/// assert_eq!(spread, Decimal::from(10));
/// ```
pub fn price_spread_percent(prices: impl IntoIterator<Item = Money>) -> Decimal {
    let mut lowest: Option<Money> = None;
    let mut highest: Option<Money> = None;
    let mut count = 0usize;

    for price in prices {
        count += 1;
        lowest = Some(lowest.map_or(price, |l| l.min(price)));
        highest = Some(highest.map_or(price, |h| h.max(price)));
    }

    match (lowest, highest) {
        (Some(low), Some(high)) if count > 1 => (high - low).percent_of(high),
        _ => Decimal::ZERO,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IngredientKind;
    use chrono::Utc;

    fn ingredient() -> Ingredient {
        let now = Utc::now();
        Ingredient {
            id: "acai".to_string(),
            name: "Polpa de açaí".to_string(),
            kind: IngredientKind::Base,
            quantity_grams: Decimal::from(1000),
            price_paid: Money::from_cents(2200),
            nominal_price: Money::from_cents(2200),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn supplier(id: &str, active: bool) -> Supplier {
        let now = Utc::now();
        Supplier {
            id: id.to_string(),
            name: format!("Fornecedor {}", id),
            contact: None,
            active,
            created_at: now,
            updated_at: now,
        }
    }

    fn quote(id: &str, supplier_id: &str, cents: i64, available: bool) -> SupplierPrice {
        let now = Utc::now();
        SupplierPrice {
            id: id.to_string(),
            supplier_id: supplier_id.to_string(),
            ingredient_id: "acai".to_string(),
            gross_price: Money::from_cents(cents + 100),
            discounted_price: Money::from_cents(cents),
            unit: PurchaseUnit::Kilogram,
            min_order_quantity: None,
            lead_time_days: Some(2),
            is_default: false,
            available,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_best_quote_and_economy() {
        let suppliers = vec![supplier("a", true), supplier("b", true)];
        let quotes = vec![quote("q1", "a", 2000, true), quote("q2", "b", 1950, true)];

        let cmp = compare_suppliers(&ingredient(), &quotes, &suppliers).unwrap();
        assert_eq!(cmp.best.supplier_id, "b");
        assert_eq!(cmp.economy.cents(), 250);
        assert_eq!(cmp.ranking.len(), 2);
        assert_eq!(cmp.ranking[1].difference_from_best.cents(), 50);
        assert_eq!(cmp.price_spread_percent, Decimal::new(25, 1));
        assert!(cmp.has_alternatives());
    }

    #[test]
    fn test_skips_unavailable_and_inactive_suppliers() {
        let suppliers = vec![supplier("a", true), supplier("b", false), supplier("c", true)];
        let quotes = vec![
            quote("q1", "a", 2000, true),
            quote("q2", "b", 1800, true),
            quote("q3", "c", 1700, false),
            quote("q4", "missing", 1000, true),
        ];

        let cmp = compare_suppliers(&ingredient(), &quotes, &suppliers).unwrap();
        assert_eq!(cmp.best.price_id, "q1");
        assert_eq!(cmp.ranking.len(), 1);
        assert_eq!(cmp.price_spread_percent, Decimal::ZERO);
    }

    #[test]
    fn test_no_eligible_quotes() {
        let suppliers = vec![supplier("a", false)];
        let quotes = vec![quote("q1", "a", 2000, true)];
        assert!(compare_suppliers(&ingredient(), &quotes, &suppliers).is_none());
        assert!(compare_suppliers(&ingredient(), &[], &suppliers).is_none());
    }

    #[test]
    fn test_economy_never_negative() {
        let suppliers = vec![supplier("a", true)];
        let quotes = vec![quote("q1", "a", 2500, true)];

        let cmp = compare_suppliers(&ingredient(), &quotes, &suppliers).unwrap();
        assert!(cmp.economy.is_zero());
        assert_eq!(cmp.economy_percent, Decimal::ZERO);
    }

    #[test]
    fn test_ties_broken_by_supplier_id() {
        let suppliers = vec![supplier("b", true), supplier("a", true)];
        let quotes = vec![quote("q1", "b", 2000, true), quote("q2", "a", 2000, true)];

        let cmp = compare_suppliers(&ingredient(), &quotes, &suppliers).unwrap();
        assert_eq!(cmp.best.supplier_id, "a");
        assert!(cmp.ranking[1].difference_from_best.is_zero());
    }

    #[test]
    fn test_zero_current_price() {
        let mut ing = ingredient();
        ing.nominal_price = Money::zero();
        let suppliers = vec![supplier("a", true)];
        let quotes = vec![quote("q1", "a", 2000, true)];

        let cmp = compare_suppliers(&ing, &quotes, &suppliers).unwrap();
        assert_eq!(cmp.economy_percent, Decimal::ZERO);
    }

    #[test]
    fn test_quotes_scaled_to_purchase_quantity() {
        // 400 g can at R$ 16,00
        let mut can = ingredient();
        can.quantity_grams = Decimal::from(400);
        can.nominal_price = Money::from_cents(1600);

        let per_kg = quote("kg", "a", 3600, true);
        let mut per_can = quote("can", "b", 1500, true);
        per_can.unit = PurchaseUnit::Unit;
        let mut per_gram = quote("g", "c", 4, true);
        per_gram.unit = PurchaseUnit::Gram;

        let suppliers = vec![supplier("a", true), supplier("b", true), supplier("c", true)];
        let cmp = compare_suppliers(&can, &[per_kg, per_can, per_gram], &suppliers).unwrap();

        let order: Vec<&str> = cmp.ranking.iter().map(|r| r.price_id.as_str()).collect();
        assert_eq!(order, vec!["kg", "can", "g"]);
        assert_eq!(cmp.best.package_price.cents(), 1440);
        assert_eq!(cmp.best.discounted_price.cents(), 3600);
        assert_eq!(cmp.ranking[1].difference_from_best.cents(), 60);
        assert_eq!(cmp.ranking[2].package_price.cents(), 1600);
        assert_eq!(cmp.economy.cents(), 160);
        assert_eq!(cmp.economy_percent, Decimal::from(10));
    }

    #[test]
    fn test_per_kg_quote_is_not_a_saving_on_a_small_package() {
        // R$ 16,00/kg looks equal to a R$ 16,00 can of 400 g but is cheaper
        let mut can = ingredient();
        can.quantity_grams = Decimal::from(400);
        can.nominal_price = Money::from_cents(1600);

        let suppliers = vec![supplier("a", true)];
        let cmp = compare_suppliers(&can, &[quote("q1", "a", 1600, true)], &suppliers).unwrap();
        assert_eq!(cmp.best.package_price.cents(), 640);
        assert_eq!(cmp.economy.cents(), 960);
    }

    #[test]
    fn test_spread_edge_cases() {
        assert_eq!(price_spread_percent([]), Decimal::ZERO);
        assert_eq!(price_spread_percent([Money::from_cents(100)]), Decimal::ZERO);
        assert_eq!(
            price_spread_percent([Money::zero(), Money::zero()]),
            Decimal::ZERO
        );
    }
}
