//! Catalog store against a real database file: writes survive reopening.

use acai_core::{
    CoreError, IngredientDraft, IngredientKind, Money, SupplierDraft, SupplierPriceDraft,
    PurchaseUnit, STORAGE_KEY,
};
use acai_db::sample::sample_catalog;
use acai_db::{CatalogStore, Database, DbConfig, DbError};
use rust_decimal::Decimal;

fn temp_db(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("acai-db-{}-{}.db", std::process::id(), name));
    let _ = std::fs::remove_file(&path);
    path
}

fn granola() -> IngredientDraft {
    IngredientDraft {
        name: "Granola".to_string(),
        kind: IngredientKind::Topping,
        quantity_grams: Decimal::from(1000),
        price_paid: Money::from_cents(1800),
        nominal_price: Money::from_cents(1800),
        active: true,
    }
}

fn quote(supplier_id: &str, ingredient_id: &str, cents: i64, is_default: bool) -> SupplierPriceDraft {
    SupplierPriceDraft {
        supplier_id: supplier_id.to_string(),
        ingredient_id: ingredient_id.to_string(),
        gross_price: Money::from_cents(cents),
        discounted_price: Money::from_cents(cents),
        unit: PurchaseUnit::Kilogram,
        min_order_quantity: None,
        lead_time_days: None,
        is_default,
        available: true,
    }
}

#[tokio::test]
async fn test_sample_catalog_survives_reopen() {
    let path = temp_db("reopen");
    let catalog = sample_catalog().unwrap();

    {
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let store = CatalogStore::open(db.clone(), STORAGE_KEY).await.unwrap();
        store.replace(catalog.clone()).await.unwrap();
        db.close().await;
    }

    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    let store = CatalogStore::open(db.clone(), STORAGE_KEY).await.unwrap();
    assert_eq!(*store.snapshot().await, catalog);
    db.close().await;

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_default_quote_moves_and_deletes_are_guarded() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let store = CatalogStore::open(db.clone(), STORAGE_KEY).await.unwrap();

    let ingredient = store.execute(|c| c.add_ingredient(granola())).await.unwrap();
    let norte = store
        .execute(|c| {
            c.add_supplier(SupplierDraft {
                name: "Norte".to_string(),
                contact: None,
                active: true,
            })
        })
        .await
        .unwrap();
    let doce = store
        .execute(|c| {
            c.add_supplier(SupplierDraft {
                name: "Doce Sabor".to_string(),
                contact: None,
                active: true,
            })
        })
        .await
        .unwrap();

    let first = store
        .execute(|c| c.add_supplier_price(quote(&norte, &ingredient, 1800, true)))
        .await
        .unwrap();
    let second = store
        .execute(|c| c.add_supplier_price(quote(&doce, &ingredient, 1600, false)))
        .await
        .unwrap();

    store
        .apply(|c| c.set_default_supplier_price(&second))
        .await
        .unwrap();

    let stored = db.snapshots().load(STORAGE_KEY).await.unwrap().unwrap();
    assert!(!stored.supplier_price(&first).unwrap().is_default);
    assert_eq!(
        stored.default_supplier_price(&ingredient).map(|q| q.id.as_str()),
        Some(second.as_str())
    );

    // Quotes still reference the supplier and the ingredient
    let err = store.apply(|c| c.delete_supplier(&doce)).await.unwrap_err();
    assert!(matches!(err, DbError::Core(CoreError::InUse { .. })));
    let err = store.apply(|c| c.delete_ingredient(&ingredient)).await.unwrap_err();
    assert!(matches!(err, DbError::Core(CoreError::InUse { .. })));

    // Nothing was written by the failed deletes
    let after = db.snapshots().load(STORAGE_KEY).await.unwrap().unwrap();
    assert_eq!(after, stored);
}
