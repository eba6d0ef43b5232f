//! # Costing Module
//!
//! Composite cost aggregation over ingredients, recipes, packaging and cups.
//!
//! ## Dispatch by Item Kind
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LineItem                        unit cost                  subtotal    │
//! │  ─────────────────────────────   ─────────────────────────  ─────────── │
//! │  Ingredient(id) × grams      ──► ingredient.price_per_gram  q × unit    │
//! │  Recipe(id)     × grams      ──► recipe cost / yield        q × unit    │
//! │  Product(id)    × units      ──► Σ packaging + Σ portions   q × unit    │
//! │                                                                         │
//! │  dangling id  ──► contributes 0, reported as CostGap::Missing           │
//! │  inactive     ──► contributes 0, reported as CostGap::Inactive          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Costs are always computed from the current catalog. Nothing here is
//! cached, so a price change shows up in every dependent cost immediately.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::money::Money;
use crate::types::{Ingredient, ItemRef, LineItem, MenuItem, Packaging, Product, Recipe};

// =============================================================================
// Lookup Seam
// =============================================================================

/// Read access to the entities a cost can depend on.
///
/// Implemented by [`crate::catalog::Catalog`]; tests can implement it over
/// plain vectors.
pub trait CostLookup {
    fn ingredient(&self, id: &str) -> Option<&Ingredient>;
    fn recipe(&self, id: &str) -> Option<&Recipe>;
    fn product(&self, id: &str) -> Option<&Product>;
    fn packaging(&self, id: &str) -> Option<&Packaging>;
}

// =============================================================================
// Breakdown Types
// =============================================================================

/// Anything that can appear as a cost line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CostRef {
    Ingredient(String),
    Recipe(String),
    Product(String),
    Packaging(String),
}

impl From<&ItemRef> for CostRef {
    fn from(item: &ItemRef) -> Self {
        match item {
            ItemRef::Ingredient(id) => CostRef::Ingredient(id.clone()),
            ItemRef::Recipe(id) => CostRef::Recipe(id.clone()),
            ItemRef::Product(id) => CostRef::Product(id.clone()),
        }
    }
}

impl fmt::Display for CostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostRef::Ingredient(id) => write!(f, "ingredient {}", id),
            CostRef::Recipe(id) => write!(f, "recipe {}", id),
            CostRef::Product(id) => write!(f, "product {}", id),
            CostRef::Packaging(id) => write!(f, "packaging {}", id),
        }
    }
}

/// Why a reference contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapReason {
    /// The id does not exist in the catalog.
    Missing,
    /// The entity exists but is deactivated.
    Inactive,
}

/// A reference that was counted as zero cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostGap {
    pub source: CostRef,
    pub reason: GapReason,
}

/// One resolved cost line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineCost {
    pub source: CostRef,
    pub name: String,
    pub quantity: Decimal,
    pub unit_cost: Money,
    pub subtotal: Money,
}

/// Result of an aggregation: the total plus how it was reached.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CostBreakdown {
    pub total: Money,
    pub lines: Vec<LineCost>,
    /// Every dangling or inactive reference met, including nested ones.
    pub gaps: Vec<CostGap>,
}

impl CostBreakdown {
    /// True when every reference resolved to an active entity.
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }

    fn push_line(&mut self, source: CostRef, name: &str, quantity: Decimal, unit_cost: Money) {
        let subtotal = unit_cost.multiply_quantity(quantity);
        self.total += subtotal;
        self.lines.push(LineCost {
            source,
            name: name.to_string(),
            quantity,
            unit_cost,
            subtotal,
        });
    }

    fn push_gap(&mut self, source: CostRef, reason: GapReason) {
        self.gaps.push(CostGap { source, reason });
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Total cost of a line-item list.
///
/// ```rust
/// use acai_core::catalog::Catalog;
/// use acai_core::costing::line_items_cost;
///
/// let empty = line_items_cost(&Catalog::default(), &[]);
/// assert!(empty.total.is_zero());
/// ```
pub fn line_items_cost<L: CostLookup + ?Sized>(lookup: &L, items: &[LineItem]) -> CostBreakdown {
    let mut breakdown = CostBreakdown::default();

    for item in items {
        let source = CostRef::from(&item.source);

        match &item.source {
            ItemRef::Ingredient(id) => match lookup.ingredient(id) {
                None => breakdown.push_gap(source, GapReason::Missing),
                Some(ing) if !ing.active => breakdown.push_gap(source, GapReason::Inactive),
                Some(ing) => {
                    breakdown.push_line(source, &ing.name, item.quantity, ing.price_per_gram())
                }
            },
            ItemRef::Recipe(id) => match lookup.recipe(id) {
                None => breakdown.push_gap(source, GapReason::Missing),
                Some(recipe) if !recipe.active => breakdown.push_gap(source, GapReason::Inactive),
                Some(recipe) => {
                    let inner = recipe_cost(lookup, recipe);
                    let per_gram = inner.total.per_unit(recipe.yield_grams);
                    breakdown.gaps.extend(inner.gaps);
                    breakdown.push_line(source, &recipe.name, item.quantity, per_gram);
                }
            },
            ItemRef::Product(id) => match lookup.product(id) {
                None => breakdown.push_gap(source, GapReason::Missing),
                Some(product) if !product.active => {
                    breakdown.push_gap(source, GapReason::Inactive)
                }
                Some(product) => {
                    let inner = product_cost(lookup, product);
                    breakdown.gaps.extend(inner.gaps);
                    breakdown.push_line(source, &product.name, item.quantity, inner.total);
                }
            },
        }
    }

    breakdown
}

/// Cost of one batch of a recipe: Σ grams × ingredient price per gram.
pub fn recipe_cost<L: CostLookup + ?Sized>(lookup: &L, recipe: &Recipe) -> CostBreakdown {
    let items: Vec<LineItem> = recipe
        .ingredients
        .iter()
        .map(|line| {
            LineItem::new(
                ItemRef::Ingredient(line.ingredient_id.clone()),
                line.quantity_grams,
            )
        })
        .collect();

    line_items_cost(lookup, &items)
}

/// Batch cost divided by yield; zero for a zero yield.
pub fn recipe_cost_per_gram<L: CostLookup + ?Sized>(lookup: &L, recipe: &Recipe) -> Money {
    recipe_cost(lookup, recipe).total.per_unit(recipe.yield_grams)
}

/// Cost of one cup: Σ packaging unit prices + Σ ingredient portions.
pub fn product_cost<L: CostLookup + ?Sized>(lookup: &L, product: &Product) -> CostBreakdown {
    let items: Vec<LineItem> = product
        .ingredients
        .iter()
        .map(|line| {
            LineItem::new(
                ItemRef::Ingredient(line.ingredient_id.clone()),
                line.quantity_grams,
            )
        })
        .collect();

    let mut breakdown = line_items_cost(lookup, &items);

    for packaging_id in &product.packaging_ids {
        let source = CostRef::Packaging(packaging_id.clone());
        match lookup.packaging(packaging_id) {
            None => breakdown.push_gap(source, GapReason::Missing),
            Some(pkg) if !pkg.active => breakdown.push_gap(source, GapReason::Inactive),
            Some(pkg) => breakdown.push_line(source, &pkg.name, Decimal::ONE, pkg.unit_price()),
        }
    }

    breakdown
}

/// Cost of a menu item, dispatched on its composition.
pub fn menu_item_cost<L: CostLookup + ?Sized>(lookup: &L, item: &MenuItem) -> CostBreakdown {
    line_items_cost(lookup, &item.composition.line_items())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        IngredientKind, MenuCategory, MenuComposition, PackagingPricing, ProductIngredient,
        RecipeCategory, RecipeIngredient,
    };
    use chrono::Utc;

    #[derive(Default)]
    struct Fixture {
        ingredients: Vec<Ingredient>,
        recipes: Vec<Recipe>,
        products: Vec<Product>,
        packaging: Vec<Packaging>,
    }

    impl CostLookup for Fixture {
        fn ingredient(&self, id: &str) -> Option<&Ingredient> {
            self.ingredients.iter().find(|i| i.id == id)
        }
        fn recipe(&self, id: &str) -> Option<&Recipe> {
            self.recipes.iter().find(|r| r.id == id)
        }
        fn product(&self, id: &str) -> Option<&Product> {
            self.products.iter().find(|p| p.id == id)
        }
        fn packaging(&self, id: &str) -> Option<&Packaging> {
            self.packaging.iter().find(|p| p.id == id)
        }
    }

    fn ingredient(id: &str, grams: i64, nominal_cents: i64, active: bool) -> Ingredient {
        let now = Utc::now();
        Ingredient {
            id: id.to_string(),
            name: id.to_string(),
            kind: IngredientKind::Base,
            quantity_grams: Decimal::from(grams),
            price_paid: Money::from_cents(nominal_cents),
            nominal_price: Money::from_cents(nominal_cents),
            active,
            created_at: now,
            updated_at: now,
        }
    }

    fn fixture() -> Fixture {
        let now = Utc::now();
        let mut f = Fixture::default();
        // R$ 0,022/g
        f.ingredients.push(ingredient("acai", 1000, 2200, true));
        // R$ 0,03/g
        f.ingredients.push(ingredient("granola", 1000, 3000, true));
        f.ingredients.push(ingredient("old-syrup", 1000, 1000, false));

        f.recipes.push(Recipe {
            id: "base".to_string(),
            name: "Base de açaí".to_string(),
            category: RecipeCategory::Base,
            ingredients: vec![RecipeIngredient {
                ingredient_id: "acai".to_string(),
                quantity_grams: Decimal::from(1000),
            }],
            yield_grams: Decimal::from(500),
            active: true,
            created_at: now,
            updated_at: now,
        });

        f.packaging.push(Packaging {
            id: "cup".to_string(),
            name: "Copo 500ml".to_string(),
            pricing: PackagingPricing::Lot {
                lot_price: Money::from_cents(2500),
                lot_quantity: Decimal::from(50),
            },
            active: true,
            created_at: now,
            updated_at: now,
        });

        f.products.push(Product {
            id: "cup-500".to_string(),
            name: "Açaí 500ml".to_string(),
            size_ml: 500,
            packaging_ids: vec!["cup".to_string()],
            ingredients: vec![
                ProductIngredient {
                    ingredient_id: "acai".to_string(),
                    quantity_grams: Decimal::from(300),
                },
                ProductIngredient {
                    ingredient_id: "granola".to_string(),
                    quantity_grams: Decimal::from(50),
                },
            ],
            sale_price: Money::from_cents(1990),
            active: true,
            created_at: now,
            updated_at: now,
        });

        f
    }

    #[test]
    fn test_empty_list_costs_zero() {
        let breakdown = line_items_cost(&fixture(), &[]);
        assert!(breakdown.total.is_zero());
        assert!(breakdown.lines.is_empty());
        assert!(breakdown.is_complete());
    }

    #[test]
    fn test_single_ingredient_line() {
        let items = [LineItem::new(
            ItemRef::Ingredient("acai".to_string()),
            Decimal::from(200),
        )];
        let breakdown = line_items_cost(&fixture(), &items);
        assert_eq!(breakdown.total, Money::from_cents(440));
        assert_eq!(breakdown.lines[0].unit_cost.amount(), Decimal::new(22, 3));
    }

    #[test]
    fn test_recipe_cost_per_gram() {
        let f = fixture();
        let recipe = &f.recipes[0];
        // 1000 g × 0.022 = 22.00, yield 500 g → 0.044/g
        assert_eq!(recipe_cost(&f, recipe).total.cents(), 2200);
        assert_eq!(recipe_cost_per_gram(&f, recipe).amount(), Decimal::new(44, 3));

        let items = [LineItem::new(
            ItemRef::Recipe("base".to_string()),
            Decimal::from(100),
        )];
        assert_eq!(line_items_cost(&f, &items).total.cents(), 440);
    }

    #[test]
    fn test_product_cost_includes_packaging() {
        let f = fixture();
        // 300 × 0.022 + 50 × 0.03 + 25.00 / 50 = 6.60 + 1.50 + 0.50
        let breakdown = product_cost(&f, &f.products[0]);
        assert_eq!(breakdown.total.cents(), 860);
        assert_eq!(breakdown.lines.len(), 3);
    }

    #[test]
    fn test_product_line_multiplies_units() {
        let items = [LineItem::new(
            ItemRef::Product("cup-500".to_string()),
            Decimal::from(2),
        )];
        assert_eq!(line_items_cost(&fixture(), &items).total.cents(), 1720);
    }

    #[test]
    fn test_missing_and_inactive_references_are_flagged() {
        let items = [
            LineItem::new(ItemRef::Ingredient("acai".to_string()), Decimal::from(100)),
            LineItem::new(ItemRef::Ingredient("ghost".to_string()), Decimal::from(100)),
            LineItem::new(ItemRef::Ingredient("old-syrup".to_string()), Decimal::from(100)),
        ];
        let breakdown = line_items_cost(&fixture(), &items);

        assert_eq!(breakdown.total.cents(), 220);
        assert!(!breakdown.is_complete());
        assert_eq!(
            breakdown.gaps,
            vec![
                CostGap {
                    source: CostRef::Ingredient("ghost".to_string()),
                    reason: GapReason::Missing,
                },
                CostGap {
                    source: CostRef::Ingredient("old-syrup".to_string()),
                    reason: GapReason::Inactive,
                },
            ]
        );
    }

    #[test]
    fn test_nested_gaps_propagate() {
        let mut f = fixture();
        f.products[0].packaging_ids.push("lid".to_string());

        let now = Utc::now();
        let item = MenuItem {
            id: "m-1".to_string(),
            name: "Combo".to_string(),
            category: MenuCategory::Combo,
            composition: MenuComposition::ProductBased {
                product_id: "cup-500".to_string(),
                quantity: Decimal::ONE,
            },
            sale_price: Money::from_cents(1990),
            active: true,
            created_at: now,
            updated_at: now,
        };

        let breakdown = menu_item_cost(&f, &item);
        assert_eq!(breakdown.total.cents(), 860);
        assert_eq!(
            breakdown.gaps,
            vec![CostGap {
                source: CostRef::Packaging("lid".to_string()),
                reason: GapReason::Missing,
            }]
        );
    }

    #[test]
    fn test_cost_follows_current_prices() {
        let mut f = fixture();
        let items = [LineItem::new(
            ItemRef::Recipe("base".to_string()),
            Decimal::from(100),
        )];
        let before = line_items_cost(&f, &items).total;

        f.ingredients[0].nominal_price = Money::from_cents(4400);
        let after = line_items_cost(&f, &items).total;

        assert_eq!(after.cents(), before.cents() * 2);
    }
}
