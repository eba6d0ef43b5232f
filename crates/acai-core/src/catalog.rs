//! # Catalog Snapshots
//!
//! The whole catalog as one immutable value.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   snapshot N ──► add_/update_/delete_*(&self, ...)                      │
//! │                        │                                                │
//! │                        ├── validate draft (validation.rs)               │
//! │                        ├── resolve referenced ids     ──► NotFound      │
//! │                        ├── check nothing still uses it ──► InUse        │
//! │                        ▼                                                │
//! │                  snapshot N+1 (new value, N untouched)                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed command leaves no trace: the caller keeps the snapshot it had.
//! Persisting snapshots is the storage crate's job.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::costing::CostLookup;
use crate::error::{CoreError, CoreResult};
use crate::types::*;
use crate::validation;
use crate::SNAPSHOT_SCHEMA_VERSION;

// =============================================================================
// Entity Plumbing
// =============================================================================

/// Anything stored in a catalog collection.
trait Entity {
    const NAME: &'static str;
    fn id(&self) -> &str;
}

macro_rules! impl_entity {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(impl Entity for $ty {
            const NAME: &'static str = $name;
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_entity! {
    Ingredient => "Ingredient",
    Packaging => "Packaging",
    Recipe => "Recipe",
    Product => "Product",
    MenuItem => "Menu item",
    Supplier => "Supplier",
    SupplierPrice => "Supplier price",
}

fn find<'a, T: Entity>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|e| e.id() == id)
}

fn index_of<T: Entity>(items: &[T], id: &str) -> CoreResult<usize> {
    items
        .iter()
        .position(|e| e.id() == id)
        .ok_or_else(|| CoreError::not_found(T::NAME, id))
}

fn require<T: Entity>(items: &[T], id: &str) -> CoreResult<()> {
    index_of(items, id).map(|_| ())
}

fn ensure_unused(entity: &'static str, id: &str, used_by: Vec<String>) -> CoreResult<()> {
    if used_by.is_empty() {
        Ok(())
    } else {
        Err(CoreError::InUse {
            entity,
            id: id.to_string(),
            used_by,
        })
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_schema_version() -> u32 {
    SNAPSHOT_SCHEMA_VERSION
}

// =============================================================================
// Catalog
// =============================================================================

/// Every registered entity, as persisted under the storage key.
///
/// Missing arrays deserialize as empty, so older blobs still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Catalog {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub packaging: Vec<Packaging>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub supplier_prices: Vec<SupplierPrice>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            packaging: Vec::new(),
            ingredients: Vec::new(),
            products: Vec::new(),
            menu_items: Vec::new(),
            recipes: Vec::new(),
            suppliers: Vec::new(),
            supplier_prices: Vec::new(),
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no entity of any kind is registered.
    pub fn is_empty(&self) -> bool {
        self.packaging.is_empty()
            && self.ingredients.is_empty()
            && self.products.is_empty()
            && self.menu_items.is_empty()
            && self.recipes.is_empty()
            && self.suppliers.is_empty()
            && self.supplier_prices.is_empty()
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    pub fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        find(&self.ingredients, id)
    }

    pub fn packaging_by_id(&self, id: &str) -> Option<&Packaging> {
        find(&self.packaging, id)
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        find(&self.recipes, id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        find(&self.products, id)
    }

    pub fn menu_item(&self, id: &str) -> Option<&MenuItem> {
        find(&self.menu_items, id)
    }

    pub fn supplier(&self, id: &str) -> Option<&Supplier> {
        find(&self.suppliers, id)
    }

    pub fn supplier_price(&self, id: &str) -> Option<&SupplierPrice> {
        find(&self.supplier_prices, id)
    }

    /// Every quote registered for an ingredient.
    pub fn quotes_for<'a>(&'a self, ingredient_id: &'a str) -> impl Iterator<Item = &'a SupplierPrice> {
        self.supplier_prices
            .iter()
            .filter(move |q| q.ingredient_id == ingredient_id)
    }

    /// The preferred quote for an ingredient, if one is flagged.
    pub fn default_supplier_price(&self, ingredient_id: &str) -> Option<&SupplierPrice> {
        self.supplier_prices
            .iter()
            .find(|q| q.ingredient_id == ingredient_id && q.is_default)
    }

    fn require_line_items(&self, items: &[LineItem]) -> CoreResult<()> {
        for item in items {
            match &item.source {
                ItemRef::Ingredient(id) => require(&self.ingredients, id)?,
                ItemRef::Recipe(id) => require(&self.recipes, id)?,
                ItemRef::Product(id) => require(&self.products, id)?,
            }
        }
        Ok(())
    }

    fn menu_items_using(&self, target: &ItemRef) -> impl Iterator<Item = String> + '_ {
        let target = target.clone();
        self.menu_items
            .iter()
            .filter(move |m| m.composition.line_items().iter().any(|l| l.source == target))
            .map(|m| format!("menu item {}", m.name))
    }

    // -------------------------------------------------------------------------
    // Ingredients
    // -------------------------------------------------------------------------

    /// Registers an ingredient and returns the new snapshot with its id.
    pub fn add_ingredient(&self, draft: IngredientDraft) -> CoreResult<(Catalog, String)> {
        validation::validate_ingredient(&draft)?;

        let now = Utc::now();
        let id = new_id();
        let mut next = self.clone();
        next.ingredients.push(Ingredient {
            id: id.clone(),
            name: draft.name.trim().to_string(),
            kind: draft.kind,
            quantity_grams: draft.quantity_grams,
            price_paid: draft.price_paid,
            nominal_price: draft.nominal_price,
            active: draft.active,
            created_at: now,
            updated_at: now,
        });
        Ok((next, id))
    }

    pub fn update_ingredient(&self, id: &str, draft: IngredientDraft) -> CoreResult<Catalog> {
        validation::validate_ingredient(&draft)?;
        let idx = index_of(&self.ingredients, id)?;

        let mut next = self.clone();
        let ing = &mut next.ingredients[idx];
        ing.name = draft.name.trim().to_string();
        ing.kind = draft.kind;
        ing.quantity_grams = draft.quantity_grams;
        ing.price_paid = draft.price_paid;
        ing.nominal_price = draft.nominal_price;
        ing.active = draft.active;
        ing.updated_at = Utc::now();
        Ok(next)
    }

    /// Removes an ingredient nobody references.
    ///
    /// Recipes, products, menu items and supplier quotes all count as
    /// references; quotes are never dropped implicitly.
    pub fn delete_ingredient(&self, id: &str) -> CoreResult<Catalog> {
        let idx = index_of(&self.ingredients, id)?;

        let mut used_by: Vec<String> = self
            .recipes
            .iter()
            .filter(|r| r.ingredients.iter().any(|l| l.ingredient_id == id))
            .map(|r| format!("recipe {}", r.name))
            .collect();
        used_by.extend(
            self.products
                .iter()
                .filter(|p| p.ingredients.iter().any(|l| l.ingredient_id == id))
                .map(|p| format!("product {}", p.name)),
        );
        used_by.extend(self.menu_items_using(&ItemRef::Ingredient(id.to_string())));
        used_by.extend(self.quotes_for(id).map(|q| {
            let supplier = self
                .supplier(&q.supplier_id)
                .map(|s| s.name.as_str())
                .unwrap_or(q.supplier_id.as_str());
            format!("quote from {}", supplier)
        }));
        ensure_unused(Ingredient::NAME, id, used_by)?;

        let mut next = self.clone();
        next.ingredients.remove(idx);
        Ok(next)
    }

    // -------------------------------------------------------------------------
    // Packaging
    // -------------------------------------------------------------------------

    pub fn add_packaging(&self, draft: PackagingDraft) -> CoreResult<(Catalog, String)> {
        validation::validate_packaging(&draft)?;

        let now = Utc::now();
        let id = new_id();
        let mut next = self.clone();
        next.packaging.push(Packaging {
            id: id.clone(),
            name: draft.name.trim().to_string(),
            pricing: draft.pricing,
            active: draft.active,
            created_at: now,
            updated_at: now,
        });
        Ok((next, id))
    }

    pub fn update_packaging(&self, id: &str, draft: PackagingDraft) -> CoreResult<Catalog> {
        validation::validate_packaging(&draft)?;
        let idx = index_of(&self.packaging, id)?;

        let mut next = self.clone();
        let pkg = &mut next.packaging[idx];
        pkg.name = draft.name.trim().to_string();
        pkg.pricing = draft.pricing;
        pkg.active = draft.active;
        pkg.updated_at = Utc::now();
        Ok(next)
    }

    pub fn delete_packaging(&self, id: &str) -> CoreResult<Catalog> {
        let idx = index_of(&self.packaging, id)?;

        let used_by = self
            .products
            .iter()
            .filter(|p| p.packaging_ids.iter().any(|pid| pid == id))
            .map(|p| format!("product {}", p.name))
            .collect();
        ensure_unused(Packaging::NAME, id, used_by)?;

        let mut next = self.clone();
        next.packaging.remove(idx);
        Ok(next)
    }

    // -------------------------------------------------------------------------
    // Recipes
    // -------------------------------------------------------------------------

    pub fn add_recipe(&self, draft: RecipeDraft) -> CoreResult<(Catalog, String)> {
        validation::validate_recipe(&draft)?;
        for line in &draft.ingredients {
            require(&self.ingredients, &line.ingredient_id)?;
        }

        let now = Utc::now();
        let id = new_id();
        let mut next = self.clone();
        next.recipes.push(Recipe {
            id: id.clone(),
            name: draft.name.trim().to_string(),
            category: draft.category,
            ingredients: draft.ingredients,
            yield_grams: draft.yield_grams,
            active: draft.active,
            created_at: now,
            updated_at: now,
        });
        Ok((next, id))
    }

    pub fn update_recipe(&self, id: &str, draft: RecipeDraft) -> CoreResult<Catalog> {
        validation::validate_recipe(&draft)?;
        let idx = index_of(&self.recipes, id)?;
        for line in &draft.ingredients {
            require(&self.ingredients, &line.ingredient_id)?;
        }

        let mut next = self.clone();
        let recipe = &mut next.recipes[idx];
        recipe.name = draft.name.trim().to_string();
        recipe.category = draft.category;
        recipe.ingredients = draft.ingredients;
        recipe.yield_grams = draft.yield_grams;
        recipe.active = draft.active;
        recipe.updated_at = Utc::now();
        Ok(next)
    }

    pub fn delete_recipe(&self, id: &str) -> CoreResult<Catalog> {
        let idx = index_of(&self.recipes, id)?;
        let used_by = self
            .menu_items_using(&ItemRef::Recipe(id.to_string()))
            .collect();
        ensure_unused(Recipe::NAME, id, used_by)?;

        let mut next = self.clone();
        next.recipes.remove(idx);
        Ok(next)
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    fn require_product_refs(&self, draft: &ProductDraft) -> CoreResult<()> {
        for pid in &draft.packaging_ids {
            require(&self.packaging, pid)?;
        }
        for line in &draft.ingredients {
            require(&self.ingredients, &line.ingredient_id)?;
        }
        Ok(())
    }

    pub fn add_product(&self, draft: ProductDraft) -> CoreResult<(Catalog, String)> {
        validation::validate_product(&draft)?;
        self.require_product_refs(&draft)?;

        let now = Utc::now();
        let id = new_id();
        let mut next = self.clone();
        next.products.push(Product {
            id: id.clone(),
            name: draft.name.trim().to_string(),
            size_ml: draft.size_ml,
            packaging_ids: draft.packaging_ids,
            ingredients: draft.ingredients,
            sale_price: draft.sale_price,
            active: draft.active,
            created_at: now,
            updated_at: now,
        });
        Ok((next, id))
    }

    pub fn update_product(&self, id: &str, draft: ProductDraft) -> CoreResult<Catalog> {
        validation::validate_product(&draft)?;
        let idx = index_of(&self.products, id)?;
        self.require_product_refs(&draft)?;

        let mut next = self.clone();
        let product = &mut next.products[idx];
        product.name = draft.name.trim().to_string();
        product.size_ml = draft.size_ml;
        product.packaging_ids = draft.packaging_ids;
        product.ingredients = draft.ingredients;
        product.sale_price = draft.sale_price;
        product.active = draft.active;
        product.updated_at = Utc::now();
        Ok(next)
    }

    pub fn delete_product(&self, id: &str) -> CoreResult<Catalog> {
        let idx = index_of(&self.products, id)?;
        let used_by = self
            .menu_items_using(&ItemRef::Product(id.to_string()))
            .collect();
        ensure_unused(Product::NAME, id, used_by)?;

        let mut next = self.clone();
        next.products.remove(idx);
        Ok(next)
    }

    // -------------------------------------------------------------------------
    // Menu Items
    // -------------------------------------------------------------------------

    pub fn add_menu_item(&self, draft: MenuItemDraft) -> CoreResult<(Catalog, String)> {
        validation::validate_menu_item(&draft)?;
        self.require_line_items(&draft.composition.line_items())?;

        let now = Utc::now();
        let id = new_id();
        let mut next = self.clone();
        next.menu_items.push(MenuItem {
            id: id.clone(),
            name: draft.name.trim().to_string(),
            category: draft.category,
            composition: draft.composition,
            sale_price: draft.sale_price,
            active: draft.active,
            created_at: now,
            updated_at: now,
        });
        Ok((next, id))
    }

    pub fn update_menu_item(&self, id: &str, draft: MenuItemDraft) -> CoreResult<Catalog> {
        validation::validate_menu_item(&draft)?;
        let idx = index_of(&self.menu_items, id)?;
        self.require_line_items(&draft.composition.line_items())?;

        let mut next = self.clone();
        let item = &mut next.menu_items[idx];
        item.name = draft.name.trim().to_string();
        item.category = draft.category;
        item.composition = draft.composition;
        item.sale_price = draft.sale_price;
        item.active = draft.active;
        item.updated_at = Utc::now();
        Ok(next)
    }

    /// Menu items are leaves; nothing can reference them.
    pub fn delete_menu_item(&self, id: &str) -> CoreResult<Catalog> {
        let idx = index_of(&self.menu_items, id)?;
        let mut next = self.clone();
        next.menu_items.remove(idx);
        Ok(next)
    }

    // -------------------------------------------------------------------------
    // Suppliers
    // -------------------------------------------------------------------------

    pub fn add_supplier(&self, draft: SupplierDraft) -> CoreResult<(Catalog, String)> {
        validation::validate_supplier(&draft)?;

        let now = Utc::now();
        let id = new_id();
        let mut next = self.clone();
        next.suppliers.push(Supplier {
            id: id.clone(),
            name: draft.name.trim().to_string(),
            contact: draft.contact,
            active: draft.active,
            created_at: now,
            updated_at: now,
        });
        Ok((next, id))
    }

    pub fn update_supplier(&self, id: &str, draft: SupplierDraft) -> CoreResult<Catalog> {
        validation::validate_supplier(&draft)?;
        let idx = index_of(&self.suppliers, id)?;

        let mut next = self.clone();
        let supplier = &mut next.suppliers[idx];
        supplier.name = draft.name.trim().to_string();
        supplier.contact = draft.contact;
        supplier.active = draft.active;
        supplier.updated_at = Utc::now();
        Ok(next)
    }

    pub fn delete_supplier(&self, id: &str) -> CoreResult<Catalog> {
        let idx = index_of(&self.suppliers, id)?;
        let used_by = self
            .supplier_prices
            .iter()
            .filter(|q| q.supplier_id == id)
            .map(|q| {
                let ingredient = self
                    .ingredient(&q.ingredient_id)
                    .map(|i| i.name.as_str())
                    .unwrap_or(q.ingredient_id.as_str());
                format!("quote for {}", ingredient)
            })
            .collect();
        ensure_unused(Supplier::NAME, id, used_by)?;

        let mut next = self.clone();
        next.suppliers.remove(idx);
        Ok(next)
    }

    // -------------------------------------------------------------------------
    // Supplier Prices
    // -------------------------------------------------------------------------

    /// Leaves at most one default quote for `ingredient_id`: the one at
    /// `keep`.
    fn clear_other_defaults(&mut self, ingredient_id: &str, keep: usize) {
        for (i, quote) in self.supplier_prices.iter_mut().enumerate() {
            if i != keep && quote.ingredient_id == ingredient_id && quote.is_default {
                quote.is_default = false;
                quote.updated_at = Utc::now();
            }
        }
    }

    /// Registers a quote. A default quote displaces any previous default
    /// for the same ingredient.
    pub fn add_supplier_price(&self, draft: SupplierPriceDraft) -> CoreResult<(Catalog, String)> {
        validation::validate_supplier_price(&draft)?;
        require(&self.suppliers, &draft.supplier_id)?;
        require(&self.ingredients, &draft.ingredient_id)?;

        let now = Utc::now();
        let id = new_id();
        let mut next = self.clone();
        next.supplier_prices.push(SupplierPrice {
            id: id.clone(),
            supplier_id: draft.supplier_id,
            ingredient_id: draft.ingredient_id.clone(),
            gross_price: draft.gross_price,
            discounted_price: draft.discounted_price,
            unit: draft.unit,
            min_order_quantity: draft.min_order_quantity,
            lead_time_days: draft.lead_time_days,
            is_default: draft.is_default,
            available: draft.available,
            created_at: now,
            updated_at: now,
        });

        if draft.is_default {
            let keep = next.supplier_prices.len() - 1;
            next.clear_other_defaults(&draft.ingredient_id, keep);
        }
        Ok((next, id))
    }

    pub fn update_supplier_price(&self, id: &str, draft: SupplierPriceDraft) -> CoreResult<Catalog> {
        validation::validate_supplier_price(&draft)?;
        let idx = index_of(&self.supplier_prices, id)?;
        require(&self.suppliers, &draft.supplier_id)?;
        require(&self.ingredients, &draft.ingredient_id)?;

        let mut next = self.clone();
        let quote = &mut next.supplier_prices[idx];
        quote.supplier_id = draft.supplier_id;
        quote.ingredient_id = draft.ingredient_id.clone();
        quote.gross_price = draft.gross_price;
        quote.discounted_price = draft.discounted_price;
        quote.unit = draft.unit;
        quote.min_order_quantity = draft.min_order_quantity;
        quote.lead_time_days = draft.lead_time_days;
        quote.is_default = draft.is_default;
        quote.available = draft.available;
        quote.updated_at = Utc::now();

        if draft.is_default {
            next.clear_other_defaults(&draft.ingredient_id, idx);
        }
        Ok(next)
    }

    pub fn delete_supplier_price(&self, id: &str) -> CoreResult<Catalog> {
        let idx = index_of(&self.supplier_prices, id)?;
        let mut next = self.clone();
        next.supplier_prices.remove(idx);
        Ok(next)
    }

    /// Marks one quote as the ingredient's default and clears the flag on
    /// every other quote for that ingredient.
    pub fn set_default_supplier_price(&self, id: &str) -> CoreResult<Catalog> {
        let idx = index_of(&self.supplier_prices, id)?;

        let mut next = self.clone();
        let ingredient_id = next.supplier_prices[idx].ingredient_id.clone();
        next.supplier_prices[idx].is_default = true;
        next.supplier_prices[idx].updated_at = Utc::now();
        next.clear_other_defaults(&ingredient_id, idx);
        Ok(next)
    }
}

impl CostLookup for Catalog {
    fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        Catalog::ingredient(self, id)
    }

    fn recipe(&self, id: &str) -> Option<&Recipe> {
        Catalog::recipe(self, id)
    }

    fn product(&self, id: &str) -> Option<&Product> {
        Catalog::product(self, id)
    }

    fn packaging(&self, id: &str) -> Option<&Packaging> {
        self.packaging_by_id(id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
