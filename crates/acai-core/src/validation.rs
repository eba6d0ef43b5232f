//! # Validation Module
//!
//! Input validation for catalog commands.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (UI)                                                     │
//! │  └── Immediate feedback (empty, obviously wrong numbers)               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog commands (Rust)                                       │
//! │  └── THIS MODULE: field rules, checked before any snapshot change      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog reference checks                                      │
//! │  └── ids must resolve, deletes must not leave dangling references      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cost aggregator itself never validates: a zero or negative quantity
//! that slips past this module simply contributes zero or negative cost.

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{
    IngredientDraft, MenuComposition, MenuItemDraft, PackagingDraft, PackagingPricing,
    ProductDraft, RecipeDraft, SupplierDraft, SupplierPriceDraft,
};
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a display name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most [`MAX_NAME_LENGTH`] characters
///
/// ## Example
/// ```rust
/// use acai_core::validation::validate_name;
///
/// assert!(validate_name("name", "Açaí 500ml").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a quantity (grams, units, yield). Must be > 0.
pub fn validate_quantity(field: &str, qty: Decimal) -> ValidationResult<()> {
    if qty <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a price. Zero is allowed (free extras), negative is not.
///
/// ```rust
/// use acai_core::money::Money;
/// use acai_core::validation::validate_price;
///
/// assert!(validate_price("sale_price", Money::from_cents(1990)).is_ok());
/// assert!(validate_price("sale_price", Money::zero()).is_ok());
/// assert!(validate_price("sale_price", Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a target margin percentage: 0 ≤ margin < 100.
///
/// ## Why the open upper bound?
/// ```text
/// price = cost / (1 - margin/100)
///
/// margin = 100 → division by zero
/// margin > 100 → negative price
/// ```
pub fn validate_margin(field: &str, margin: Decimal) -> ValidationResult<()> {
    if margin < Decimal::ZERO || margin >= Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max: Decimal::new(9999, 2),
        });
    }

    Ok(())
}

/// Validates a threshold percentage: 0 ≤ value ≤ 100.
pub fn validate_percentage(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        });
    }

    Ok(())
}

/// Rejects the same id appearing twice in one list.
fn validate_unique_ids<'a>(
    field: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::Duplicate {
                field: field.to_string(),
                value: id.to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Draft Validators
// =============================================================================

pub fn validate_ingredient(draft: &IngredientDraft) -> ValidationResult<()> {
    validate_name("name", &draft.name)?;
    validate_quantity("quantity_grams", draft.quantity_grams)?;
    validate_price("price_paid", draft.price_paid)?;
    validate_price("nominal_price", draft.nominal_price)?;

    if draft.price_paid > draft.nominal_price {
        return Err(ValidationError::Inconsistent {
            field: "price_paid".to_string(),
            reason: "cannot be higher than the nominal price".to_string(),
        });
    }

    Ok(())
}

pub fn validate_packaging(draft: &PackagingDraft) -> ValidationResult<()> {
    validate_name("name", &draft.name)?;

    match &draft.pricing {
        PackagingPricing::Unit { price } => validate_price("price", *price),
        PackagingPricing::Lot {
            lot_price,
            lot_quantity,
        } => {
            validate_price("lot_price", *lot_price)?;
            validate_quantity("lot_quantity", *lot_quantity)
        }
    }
}

pub fn validate_recipe(draft: &RecipeDraft) -> ValidationResult<()> {
    validate_name("name", &draft.name)?;
    validate_quantity("yield_grams", draft.yield_grams)?;

    if draft.ingredients.is_empty() {
        return Err(ValidationError::Required {
            field: "ingredients".to_string(),
        });
    }

    for line in &draft.ingredients {
        validate_quantity("quantity_grams", line.quantity_grams)?;
    }

    validate_unique_ids(
        "ingredient_id",
        draft.ingredients.iter().map(|l| l.ingredient_id.as_str()),
    )
}

pub fn validate_product(draft: &ProductDraft) -> ValidationResult<()> {
    validate_name("name", &draft.name)?;
    validate_price("sale_price", draft.sale_price)?;

    if draft.size_ml == 0 {
        return Err(ValidationError::MustBePositive {
            field: "size_ml".to_string(),
        });
    }

    for line in &draft.ingredients {
        validate_quantity("quantity_grams", line.quantity_grams)?;
    }

    validate_unique_ids(
        "ingredient_id",
        draft.ingredients.iter().map(|l| l.ingredient_id.as_str()),
    )
}

pub fn validate_menu_item(draft: &MenuItemDraft) -> ValidationResult<()> {
    validate_name("name", &draft.name)?;
    validate_price("sale_price", draft.sale_price)?;

    if let MenuComposition::Composite { components } = &draft.composition {
        if components.is_empty() {
            return Err(ValidationError::Required {
                field: "components".to_string(),
            });
        }
    }

    for line in draft.composition.line_items() {
        validate_quantity("quantity", line.quantity)?;
    }

    Ok(())
}

pub fn validate_supplier(draft: &SupplierDraft) -> ValidationResult<()> {
    validate_name("name", &draft.name)
}

pub fn validate_supplier_price(draft: &SupplierPriceDraft) -> ValidationResult<()> {
    validate_price("gross_price", draft.gross_price)?;
    validate_price("discounted_price", draft.discounted_price)?;

    if draft.discounted_price > draft.gross_price {
        return Err(ValidationError::Inconsistent {
            field: "discounted_price".to_string(),
            reason: "cannot be higher than the gross price".to_string(),
        });
    }

    if let Some(min) = draft.min_order_quantity {
        validate_quantity("min_order_quantity", min)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IngredientKind, ItemRef, LineItem, MenuCategory, RecipeCategory, RecipeIngredient};

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Granola").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(MAX_NAME_LENGTH + 1)).is_err());
        // Accents count as one character each
        assert!(validate_name("name", &"á".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity("q", Decimal::ONE).is_ok());
        assert!(validate_quantity("q", Decimal::new(5, 1)).is_ok());
        assert!(validate_quantity("q", Decimal::ZERO).is_err());
        assert!(validate_quantity("q", Decimal::from(-10)).is_err());
    }

    #[test]
    fn test_validate_margin() {
        assert!(validate_margin("m", Decimal::ZERO).is_ok());
        assert!(validate_margin("m", Decimal::new(9999, 2)).is_ok());
        assert!(validate_margin("m", Decimal::ONE_HUNDRED).is_err());
        assert!(validate_margin("m", Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_ingredient_paid_above_nominal() {
        let draft = IngredientDraft {
            name: "Leite em pó".to_string(),
            kind: IngredientKind::Dairy,
            quantity_grams: Decimal::from(400),
            price_paid: Money::from_cents(1500),
            nominal_price: Money::from_cents(1200),
            active: true,
        };
        assert!(matches!(
            validate_ingredient(&draft),
            Err(ValidationError::Inconsistent { .. })
        ));
    }

    #[test]
    fn test_validate_recipe_rules() {
        let mut draft = RecipeDraft {
            name: "Creme de ninho".to_string(),
            category: RecipeCategory::Cream,
            ingredients: vec![],
            yield_grams: Decimal::from(1000),
            active: true,
        };
        assert!(validate_recipe(&draft).is_err());

        let line = RecipeIngredient {
            ingredient_id: "ing-1".to_string(),
            quantity_grams: Decimal::from(200),
        };
        draft.ingredients = vec![line.clone()];
        assert!(validate_recipe(&draft).is_ok());

        draft.ingredients = vec![line.clone(), line];
        assert!(matches!(
            validate_recipe(&draft),
            Err(ValidationError::Duplicate { .. })
        ));

        draft.ingredients.pop();
        draft.yield_grams = Decimal::ZERO;
        assert!(validate_recipe(&draft).is_err());
    }

    #[test]
    fn test_validate_menu_item_rejects_empty_composite() {
        let mut draft = MenuItemDraft {
            name: "Combo casal".to_string(),
            category: MenuCategory::Combo,
            composition: MenuComposition::Composite { components: vec![] },
            sale_price: Money::from_cents(3990),
            active: true,
        };
        assert!(validate_menu_item(&draft).is_err());

        draft.composition = MenuComposition::Composite {
            components: vec![LineItem::new(
                ItemRef::Product("p-1".to_string()),
                Decimal::from(2),
            )],
        };
        assert!(validate_menu_item(&draft).is_ok());

        draft.composition = MenuComposition::Composite {
            components: vec![LineItem::new(
                ItemRef::Product("p-1".to_string()),
                Decimal::ZERO,
            )],
        };
        assert!(validate_menu_item(&draft).is_err());
    }

    #[test]
    fn test_validate_packaging_lot_quantity() {
        let draft = PackagingDraft {
            name: "Tampa".to_string(),
            pricing: PackagingPricing::Lot {
                lot_price: Money::from_cents(1000),
                lot_quantity: Decimal::ZERO,
            },
            active: true,
        };
        assert!(validate_packaging(&draft).is_err());
    }
}
