//! # Sample Catalog
//!
//! A realistic small-shop catalog for demos and first runs.
//!
//! ```text
//! suppliers  3   Distribuidora Norte, Polpas do Pará, Atacado Doce Sabor
//! ingredients 9  açaí pulp, guaraná syrup, granola, leite em pó, ...
//! packaging  5   cups 300/500/700 ml (lots), lid, spoons
//! recipes    2   Base de açaí, Creme de ninho
//! products   3   Açaí 300/500/700 ml
//! menu items 7   cups, a bowl, a couple's combo, extras
//! quotes     6   two or three per key ingredient, one default each
//! ```
//!
//! Prices are picked so the scan shows one item of each alert kind except
//! cost gaps.

use acai_core::{
    Catalog, CoreResult, IngredientDraft, IngredientKind, ItemRef, LineItem, MenuCategory,
    MenuComposition, MenuItemDraft, Money, PackagingDraft, PackagingPricing, ProductDraft,
    ProductIngredient, PurchaseUnit, RecipeCategory, RecipeDraft, RecipeIngredient,
    SupplierDraft, SupplierPriceDraft,
};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::DbResult;
use crate::store::CatalogStore;

fn brl(cents: i64) -> Money {
    Money::from_cents(cents)
}

fn grams(g: i64) -> Decimal {
    Decimal::from(g)
}

/// Appends a supplier and returns its id.
fn supplier(catalog: &mut Catalog, name: &str, contact: &str) -> CoreResult<String> {
    let (next, id) = catalog.add_supplier(SupplierDraft {
        name: name.to_string(),
        contact: Some(contact.to_string()),
        active: true,
    })?;
    *catalog = next;
    Ok(id)
}

fn ingredient(
    catalog: &mut Catalog,
    name: &str,
    kind: IngredientKind,
    quantity: i64,
    paid_cents: i64,
    nominal_cents: i64,
) -> CoreResult<String> {
    let (next, id) = catalog.add_ingredient(IngredientDraft {
        name: name.to_string(),
        kind,
        quantity_grams: grams(quantity),
        price_paid: brl(paid_cents),
        nominal_price: brl(nominal_cents),
        active: true,
    })?;
    *catalog = next;
    Ok(id)
}

fn packaging(catalog: &mut Catalog, name: &str, pricing: PackagingPricing) -> CoreResult<String> {
    let (next, id) = catalog.add_packaging(PackagingDraft {
        name: name.to_string(),
        pricing,
        active: true,
    })?;
    *catalog = next;
    Ok(id)
}

fn quote(
    catalog: &mut Catalog,
    supplier_id: &str,
    ingredient_id: &str,
    gross_cents: i64,
    discounted_cents: i64,
    is_default: bool,
) -> CoreResult<String> {
    let (next, id) = catalog.add_supplier_price(SupplierPriceDraft {
        supplier_id: supplier_id.to_string(),
        ingredient_id: ingredient_id.to_string(),
        gross_price: brl(gross_cents),
        discounted_price: brl(discounted_cents),
        unit: PurchaseUnit::Kilogram,
        min_order_quantity: Some(Decimal::from(5)),
        lead_time_days: Some(2),
        is_default,
        available: true,
    })?;
    *catalog = next;
    Ok(id)
}

fn cup(
    catalog: &mut Catalog,
    name: &str,
    size_ml: u32,
    packaging_ids: Vec<String>,
    portions: &[(&str, i64)],
    price_cents: i64,
) -> CoreResult<String> {
    let (next, id) = catalog.add_product(ProductDraft {
        name: name.to_string(),
        size_ml,
        packaging_ids,
        ingredients: portions
            .iter()
            .map(|(ingredient_id, g)| ProductIngredient {
                ingredient_id: ingredient_id.to_string(),
                quantity_grams: grams(*g),
            })
            .collect(),
        sale_price: brl(price_cents),
        active: true,
    })?;
    *catalog = next;
    Ok(id)
}

fn menu_item(
    catalog: &mut Catalog,
    name: &str,
    category: MenuCategory,
    composition: MenuComposition,
    price_cents: i64,
) -> CoreResult<String> {
    let (next, id) = catalog.add_menu_item(MenuItemDraft {
        name: name.to_string(),
        category,
        composition,
        sale_price: brl(price_cents),
        active: true,
    })?;
    *catalog = next;
    Ok(id)
}

/// Builds the sample catalog through the regular catalog commands, so it
/// satisfies every validation and reference rule.
pub fn sample_catalog() -> CoreResult<Catalog> {
    let mut c = Catalog::new();

    // Suppliers
    let norte = supplier(&mut c, "Distribuidora Norte", "(91) 3222-1000")?;
    let para = supplier(&mut c, "Polpas do Pará", "(91) 98888-2020")?;
    let doce = supplier(&mut c, "Atacado Doce Sabor", "vendas@docesabor.com.br")?;

    // Ingredients
    let acai = ingredient(&mut c, "Polpa de açaí", IngredientKind::Base, 1000, 2000, 2200)?;
    let xarope = ingredient(&mut c, "Xarope de guaraná", IngredientKind::Syrup, 1000, 900, 900)?;
    let granola = ingredient(&mut c, "Granola", IngredientKind::Topping, 1000, 1800, 1800)?;
    let leite_po = ingredient(&mut c, "Leite em pó", IngredientKind::Dairy, 400, 1450, 1600)?;
    let condensado = ingredient(&mut c, "Leite condensado", IngredientKind::Dairy, 395, 650, 650)?;
    let banana = ingredient(&mut c, "Banana", IngredientKind::Fruit, 1000, 600, 600)?;
    let morango = ingredient(&mut c, "Morango", IngredientKind::Fruit, 1000, 2400, 2400)?;
    let pacoca = ingredient(&mut c, "Paçoca", IngredientKind::Topping, 1000, 2800, 3000)?;
    let _creme_avela = ingredient(&mut c, "Creme de avelã", IngredientKind::Other, 650, 3500, 3990)?;

    // Packaging
    let copo_300 = packaging(
        &mut c,
        "Copo 300ml",
        PackagingPricing::Lot {
            lot_price: brl(2000),
            lot_quantity: Decimal::from(50),
        },
    )?;
    let copo_500 = packaging(
        &mut c,
        "Copo 500ml",
        PackagingPricing::Lot {
            lot_price: brl(2500),
            lot_quantity: Decimal::from(50),
        },
    )?;
    let copo_700 = packaging(
        &mut c,
        "Copo 700ml",
        PackagingPricing::Lot {
            lot_price: brl(3500),
            lot_quantity: Decimal::from(50),
        },
    )?;
    let tampa = packaging(&mut c, "Tampa", PackagingPricing::Unit { price: brl(15) })?;
    let colher = packaging(
        &mut c,
        "Colher",
        PackagingPricing::Lot {
            lot_price: brl(800),
            lot_quantity: Decimal::from(100),
        },
    )?;

    // Recipes
    let (next, base) = c.add_recipe(RecipeDraft {
        name: "Base de açaí".to_string(),
        category: RecipeCategory::Base,
        ingredients: vec![
            RecipeIngredient {
                ingredient_id: acai.clone(),
                quantity_grams: grams(1000),
            },
            RecipeIngredient {
                ingredient_id: xarope.clone(),
                quantity_grams: grams(200),
            },
        ],
        yield_grams: grams(1200),
        active: true,
    })?;
    c = next;

    let (next, creme_ninho) = c.add_recipe(RecipeDraft {
        name: "Creme de ninho".to_string(),
        category: RecipeCategory::Cream,
        ingredients: vec![
            RecipeIngredient {
                ingredient_id: leite_po.clone(),
                quantity_grams: grams(200),
            },
            RecipeIngredient {
                ingredient_id: condensado.clone(),
                quantity_grams: grams(395),
            },
        ],
        yield_grams: grams(550),
        active: true,
    })?;
    c = next;

    // Cups
    let acai_300 = cup(
        &mut c,
        "Açaí 300ml",
        300,
        vec![copo_300, tampa.clone(), colher.clone()],
        &[(acai.as_str(), 220), (granola.as_str(), 30), (banana.as_str(), 40)],
        1290,
    )?;
    let acai_500 = cup(
        &mut c,
        "Açaí 500ml",
        500,
        vec![copo_500, tampa.clone(), colher.clone()],
        &[
            (acai.as_str(), 380),
            (granola.as_str(), 40),
            (banana.as_str(), 60),
            (leite_po.as_str(), 15),
        ],
        1990,
    )?;
    let acai_700 = cup(
        &mut c,
        "Açaí 700ml",
        700,
        vec![copo_700, tampa, colher],
        &[
            (acai.as_str(), 540),
            (granola.as_str(), 50),
            (morango.as_str(), 60),
            (leite_po.as_str(), 20),
        ],
        2490,
    )?;

    // Menu
    menu_item(
        &mut c,
        "Açaí 300ml",
        MenuCategory::Cup,
        MenuComposition::ProductBased {
            product_id: acai_300,
            quantity: Decimal::ONE,
        },
        1290,
    )?;
    menu_item(
        &mut c,
        "Açaí 500ml",
        MenuCategory::Cup,
        MenuComposition::ProductBased {
            product_id: acai_500.clone(),
            quantity: Decimal::ONE,
        },
        1990,
    )?;
    // Priced as a promotion: below the critical margin
    menu_item(
        &mut c,
        "Açaí 700ml",
        MenuCategory::Cup,
        MenuComposition::ProductBased {
            product_id: acai_700,
            quantity: Decimal::ONE,
        },
        1690,
    )?;
    menu_item(
        &mut c,
        "Combo casal",
        MenuCategory::Combo,
        MenuComposition::Composite {
            components: vec![
                LineItem::new(ItemRef::Product(acai_500), Decimal::TWO),
                LineItem::new(ItemRef::Recipe(creme_ninho.clone()), grams(80)),
            ],
        },
        4490,
    )?;
    menu_item(
        &mut c,
        "Adicional creme de ninho",
        MenuCategory::Extra,
        MenuComposition::RecipeBased {
            recipe_id: creme_ninho,
            quantity_grams: grams(50),
        },
        500,
    )?;
    menu_item(
        &mut c,
        "Açaí puro no pote 1kg",
        MenuCategory::Bowl,
        MenuComposition::RecipeBased {
            recipe_id: base,
            quantity_grams: grams(1000),
        },
        3990,
    )?;
    menu_item(
        &mut c,
        "Adicional paçoca",
        MenuCategory::Extra,
        MenuComposition::SingleIngredient {
            ingredient_id: pacoca.clone(),
            quantity_grams: grams(30),
        },
        300,
    )?;

    // Supplier quotes
    quote(&mut c, &norte, &acai, 2200, 2000, true)?;
    quote(&mut c, &para, &acai, 2000, 1850, false)?;
    quote(&mut c, &norte, &granola, 1800, 1800, true)?;
    quote(&mut c, &doce, &granola, 1700, 1550, false)?;
    quote(&mut c, &doce, &leite_po, 4000, 3625, true)?;
    quote(&mut c, &doce, &pacoca, 3000, 2800, true)?;

    Ok(c)
}

// =============================================================================
// Seeding
// =============================================================================

/// What [`seed`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The sample catalog was written.
    Seeded { ingredients: usize, menu_items: usize },
    /// The store already had data and `force` was not set.
    SkippedNonEmpty,
}

/// Writes the sample catalog into `store` unless it already holds data.
pub async fn seed(store: &CatalogStore, force: bool) -> DbResult<SeedOutcome> {
    if !force && !store.snapshot().await.is_empty() {
        info!(key = %store.key(), "Catalog not empty, skipping sample data");
        return Ok(SeedOutcome::SkippedNonEmpty);
    }

    let catalog = sample_catalog()?;
    let outcome = SeedOutcome::Seeded {
        ingredients: catalog.ingredients.len(),
        menu_items: catalog.menu_items.len(),
    };
    store.replace(catalog).await?;

    info!(key = %store.key(), ?outcome, "Sample catalog written");
    Ok(outcome)
}
