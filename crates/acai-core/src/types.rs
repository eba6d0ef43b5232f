//! # Domain Types
//!
//! Catalog entities for the açaí shop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐                    │
//! │  │ Ingredient  │◄──│   Recipe    │   │  Packaging  │                    │
//! │  │ price/gram  │   │ cost/gram   │   │ unit price  │                    │
//! │  └──────▲──────┘   └──────▲──────┘   └──────▲──────┘                    │
//! │         │                 │                 │                           │
//! │         │          ┌──────┴──────┐   ┌──────┴──────┐                    │
//! │         ├──────────│  MenuItem   │──►│ Product(cup)│                    │
//! │         │          │ composition │   │ total cost  │                    │
//! │         │          └─────────────┘   └─────────────┘                    │
//! │  ┌──────┴──────┐   ┌─────────────┐                                      │
//! │  │SupplierPrice│──►│  Supplier   │                                      │
//! │  └─────────────┘   └─────────────┘                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived Values
//! Nothing derived from another entity is stored here. Price per gram and
//! packaging unit price only depend on the entity itself; every cost that
//! crosses entities is computed by [`crate::costing`] at read time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Closed Categories
// =============================================================================

/// What kind of raw ingredient this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum IngredientKind {
    /// Açaí or cupuaçu pulp, the base of every cup.
    Base,
    Fruit,
    /// Granola, paçoca, leite em pó, etc.
    Topping,
    Syrup,
    Dairy,
    Other,
}

/// Category of an internal preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RecipeCategory {
    /// Prepared açaí base (pulp + syrup + guaraná).
    Base,
    Cream,
    Sauce,
    Topping,
    Other,
}

/// Category a menu item is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Cup,
    Bowl,
    Combo,
    Extra,
    Drink,
    Other,
}

impl MenuCategory {
    /// Every category, in menu order.
    pub const ALL: [MenuCategory; 6] = [
        MenuCategory::Cup,
        MenuCategory::Bowl,
        MenuCategory::Combo,
        MenuCategory::Extra,
        MenuCategory::Drink,
        MenuCategory::Other,
    ];
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuCategory::Cup => "cup",
            MenuCategory::Bowl => "bowl",
            MenuCategory::Combo => "combo",
            MenuCategory::Extra => "extra",
            MenuCategory::Drink => "drink",
            MenuCategory::Other => "other",
        };
        f.write_str(label)
    }
}

/// Unit a supplier quotes its price in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseUnit {
    Kilogram,
    Gram,
    Liter,
    Unit,
    Box,
}

impl PurchaseUnit {
    /// Grams one quoted unit stands for; `None` for quotes per package
    /// (`Unit`, `Box`). A liter counts as a kilogram.
    pub fn grams(self) -> Option<Decimal> {
        match self {
            PurchaseUnit::Kilogram | PurchaseUnit::Liter => Some(Decimal::ONE_THOUSAND),
            PurchaseUnit::Gram => Some(Decimal::ONE),
            PurchaseUnit::Unit | PurchaseUnit::Box => None,
        }
    }
}

// =============================================================================
// Ingredient
// =============================================================================

/// A raw ingredient bought from a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ingredient {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    pub kind: IngredientKind,
    /// Quantity bought in one purchase, in grams.
    #[ts(type = "string")]
    pub quantity_grams: Decimal,
    /// What was actually paid (after discounts).
    pub price_paid: Money,
    /// Undiscounted price for the same quantity. Costs use this one.
    pub nominal_price: Money,
    pub active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Ingredient {
    /// Nominal price divided by purchased quantity.
    ///
    /// ```text
    /// 1000 g bought for R$ 22,00 nominal → R$ 0,022 per gram
    /// ```
    pub fn price_per_gram(&self) -> Money {
        self.nominal_price.per_unit(self.quantity_grams)
    }

    /// Discount obtained on the purchase (nominal − paid).
    pub fn purchase_discount(&self) -> Money {
        self.nominal_price - self.price_paid
    }
}

// =============================================================================
// Packaging
// =============================================================================

/// How a packaging price was entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PackagingPricing {
    /// Price of a single unit.
    Unit { price: Money },
    /// Price of a lot (e.g. 50 cups for R$ 25,00).
    Lot {
        lot_price: Money,
        #[ts(type = "string")]
        lot_quantity: Decimal,
    },
}

/// Cups, lids, spoons, bags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Packaging {
    pub id: String,
    pub name: String,
    pub pricing: PackagingPricing,
    pub active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Packaging {
    /// Price of one unit, derived from the lot when bought in lots.
    pub fn unit_price(&self) -> Money {
        match &self.pricing {
            PackagingPricing::Unit { price } => *price,
            PackagingPricing::Lot {
                lot_price,
                lot_quantity,
            } => crate::pricing::unit_price_from_lot(*lot_price, *lot_quantity),
        }
    }
}

// =============================================================================
// Recipe
// =============================================================================

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecipeIngredient {
    pub ingredient_id: String,
    #[ts(type = "string")]
    pub quantity_grams: Decimal,
}

/// An internal semi-finished preparation with its own yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: RecipeCategory,
    pub ingredients: Vec<RecipeIngredient>,
    /// Grams produced by one batch.
    #[ts(type = "string")]
    pub yield_grams: Decimal,
    pub active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Product (cup)
// =============================================================================

/// One ingredient portion in a cup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductIngredient {
    pub ingredient_id: String,
    #[ts(type = "string")]
    pub quantity_grams: Decimal,
}

/// A finished cup: packaging plus ingredient portions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Cup size in milliliters (300, 500, 700...).
    pub size_ml: u32,
    pub packaging_ids: Vec<String>,
    pub ingredients: Vec<ProductIngredient>,
    pub sale_price: Money,
    pub active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Line Items & Menu Items
// =============================================================================

/// Reference to something that has a cost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ItemRef {
    Ingredient(String),
    Recipe(String),
    Product(String),
}

impl ItemRef {
    /// The referenced entity id.
    pub fn id(&self) -> &str {
        match self {
            ItemRef::Ingredient(id) | ItemRef::Recipe(id) | ItemRef::Product(id) => id,
        }
    }

    /// Entity name used in messages ("Ingredient", "Recipe", "Product").
    pub fn entity(&self) -> &'static str {
        match self {
            ItemRef::Ingredient(_) => "Ingredient",
            ItemRef::Recipe(_) => "Recipe",
            ItemRef::Product(_) => "Product",
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.entity(), self.id())
    }
}

/// A quantity of something with a cost.
///
/// `quantity` is grams for ingredients and recipes, units for products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub source: ItemRef,
    #[ts(type = "string")]
    pub quantity: Decimal,
}

impl LineItem {
    pub fn new(source: ItemRef, quantity: Decimal) -> Self {
        LineItem { source, quantity }
    }
}

/// What a menu item is made of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuComposition {
    /// Sold by weight straight from one ingredient (e.g. extra granola).
    SingleIngredient {
        ingredient_id: String,
        #[ts(type = "string")]
        quantity_grams: Decimal,
    },
    /// A portion of an internal recipe (e.g. 300 g of cream).
    RecipeBased {
        recipe_id: String,
        #[ts(type = "string")]
        quantity_grams: Decimal,
    },
    /// One or more finished cups.
    ProductBased {
        product_id: String,
        #[ts(type = "string")]
        quantity: Decimal,
    },
    /// A bundle of anything above.
    Composite { components: Vec<LineItem> },
}

impl MenuComposition {
    /// Flattens the composition into line items for the cost aggregator.
    pub fn line_items(&self) -> Vec<LineItem> {
        match self {
            MenuComposition::SingleIngredient {
                ingredient_id,
                quantity_grams,
            } => vec![LineItem::new(
                ItemRef::Ingredient(ingredient_id.clone()),
                *quantity_grams,
            )],
            MenuComposition::RecipeBased {
                recipe_id,
                quantity_grams,
            } => vec![LineItem::new(
                ItemRef::Recipe(recipe_id.clone()),
                *quantity_grams,
            )],
            MenuComposition::ProductBased {
                product_id,
                quantity,
            } => vec![LineItem::new(ItemRef::Product(product_id.clone()), *quantity)],
            MenuComposition::Composite { components } => components.clone(),
        }
    }
}

/// A sellable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: MenuCategory,
    pub composition: MenuComposition,
    pub sale_price: Money,
    pub active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Suppliers
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact: Option<String>,
    pub active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A supplier's quote for one ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SupplierPrice {
    pub id: String,
    pub supplier_id: String,
    pub ingredient_id: String,
    pub gross_price: Money,
    pub discounted_price: Money,
    pub unit: PurchaseUnit,
    #[ts(type = "string | null")]
    pub min_order_quantity: Option<Decimal>,
    pub lead_time_days: Option<u32>,
    /// Preferred quote for the ingredient. At most one per ingredient.
    pub is_default: bool,
    /// Whether the supplier can currently deliver at this price.
    pub available: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Drafts (command input)
// =============================================================================
// Drafts carry the user-editable fields; the catalog assigns ids and
// timestamps.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IngredientDraft {
    pub name: String,
    pub kind: IngredientKind,
    #[ts(type = "string")]
    pub quantity_grams: Decimal,
    pub price_paid: Money,
    pub nominal_price: Money,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PackagingDraft {
    pub name: String,
    pub pricing: PackagingPricing,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecipeDraft {
    pub name: String,
    pub category: RecipeCategory,
    pub ingredients: Vec<RecipeIngredient>,
    #[ts(type = "string")]
    pub yield_grams: Decimal,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    pub size_ml: u32,
    pub packaging_ids: Vec<String>,
    pub ingredients: Vec<ProductIngredient>,
    pub sale_price: Money,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItemDraft {
    pub name: String,
    pub category: MenuCategory,
    pub composition: MenuComposition,
    pub sale_price: Money,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SupplierDraft {
    pub name: String,
    pub contact: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SupplierPriceDraft {
    pub supplier_id: String,
    pub ingredient_id: String,
    pub gross_price: Money,
    pub discounted_price: Money,
    pub unit: PurchaseUnit,
    #[ts(type = "string | null")]
    pub min_order_quantity: Option<Decimal>,
    pub lead_time_days: Option<u32>,
    pub is_default: bool,
    pub available: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(quantity_grams: i64, nominal_cents: i64) -> Ingredient {
        let now = Utc::now();
        Ingredient {
            id: "ing-1".to_string(),
            name: "Polpa de açaí".to_string(),
            kind: IngredientKind::Base,
            quantity_grams: Decimal::from(quantity_grams),
            price_paid: Money::from_cents(nominal_cents - 200),
            nominal_price: Money::from_cents(nominal_cents),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_price_per_gram_uses_nominal_price() {
        let ing = ingredient(1000, 2200);
        assert_eq!(ing.price_per_gram().amount(), Decimal::new(22, 3));
        assert_eq!(ing.purchase_discount().cents(), 200);
    }

    #[test]
    fn test_price_per_gram_zero_quantity() {
        let ing = ingredient(0, 2200);
        assert!(ing.price_per_gram().is_zero());
    }

    #[test]
    fn test_packaging_unit_price_from_lot() {
        let now = Utc::now();
        let cups = Packaging {
            id: "pkg-1".to_string(),
            name: "Copo 500ml".to_string(),
            pricing: PackagingPricing::Lot {
                lot_price: Money::from_cents(2500),
                lot_quantity: Decimal::from(50),
            },
            active: true,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(cups.unit_price().cents(), 50);
    }

    #[test]
    fn test_composition_line_items() {
        let single = MenuComposition::RecipeBased {
            recipe_id: "rec-1".to_string(),
            quantity_grams: Decimal::from(300),
        };
        let items = single.line_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source, ItemRef::Recipe("rec-1".to_string()));
        assert_eq!(items[0].quantity, Decimal::from(300));
    }

    #[test]
    fn test_item_ref_serialization() {
        let json = serde_json::to_string(&ItemRef::Product("p-1".to_string())).unwrap();
        assert_eq!(json, r#"{"kind":"product","id":"p-1"}"#);
    }

    #[test]
    fn test_menu_category_display() {
        assert_eq!(MenuCategory::Combo.to_string(), "combo");
        assert_eq!(MenuCategory::ALL.len(), 6);
    }
}
