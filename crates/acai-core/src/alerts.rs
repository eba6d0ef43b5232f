//! # Alerts
//!
//! Threshold checks over the current catalog.
//!
//! ```text
//! ┌──────────────────────┬───────────────────────────────┬──────────────────┐
//! │ Kind                 │ Raised when                   │ Severity         │
//! ├──────────────────────┼───────────────────────────────┼──────────────────┤
//! │ CriticalMargin       │ margin < critical_margin      │ High on any loss │
//! │                      │                               │ or ≥ 3 items     │
//! │ PricingOpportunity   │ margin > opportunity_margin   │ Low, Medium ≥ 3  │
//! │ SupplierEconomy      │ quote spread > supplier_spread│ Medium at 2×     │
//! │ CostGap              │ missing/inactive references   │ High if missing  │
//! └──────────────────────┴───────────────────────────────┴──────────────────┘
//! ```
//!
//! Each kind produces at most one alert listing every affected item. Scans
//! are stateless: nothing is remembered between calls.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::costing::GapReason;
use crate::error::ValidationError;
use crate::stats::{self, ItemReport};
use crate::supplier;
use crate::validation::{validate_percentage, ValidationResult};
use crate::{DEFAULT_CRITICAL_MARGIN, DEFAULT_OPPORTUNITY_MARGIN, DEFAULT_SUPPLIER_SPREAD};

/// Items in one alert at or above which severity escalates.
const ESCALATION_COUNT: usize = 3;

// =============================================================================
// Thresholds
// =============================================================================

/// Percentages that trigger alerts. Loaded from the `[alerts]` config
/// section; missing fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct AlertThresholds {
    #[ts(type = "string")]
    pub critical_margin: Decimal,
    #[ts(type = "string")]
    pub opportunity_margin: Decimal,
    #[ts(type = "string")]
    pub supplier_spread: Decimal,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        AlertThresholds {
            critical_margin: Decimal::from(DEFAULT_CRITICAL_MARGIN),
            opportunity_margin: Decimal::from(DEFAULT_OPPORTUNITY_MARGIN),
            supplier_spread: Decimal::from(DEFAULT_SUPPLIER_SPREAD),
        }
    }
}

impl AlertThresholds {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_percentage("critical_margin", self.critical_margin)?;
        validate_percentage("opportunity_margin", self.opportunity_margin)?;
        validate_percentage("supplier_spread", self.supplier_spread)?;

        if self.critical_margin >= self.opportunity_margin {
            return Err(ValidationError::Inconsistent {
                field: "critical_margin".to_string(),
                reason: "must be lower than opportunity_margin".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Alert Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    CriticalMargin,
    PricingOpportunity,
    SupplierEconomy,
    CostGap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    /// Names of the items the alert is about.
    pub affected: Vec<String>,
    /// Suggested next step, shown as a button label.
    pub action: String,
}

// =============================================================================
// Scanner
// =============================================================================

/// Runs every check and returns the raised alerts, most severe first.
pub fn scan(catalog: &Catalog, thresholds: &AlertThresholds) -> Vec<Alert> {
    let reports: Vec<ItemReport> = stats::menu_report(catalog)
        .into_iter()
        .filter(|r| r.active)
        .collect();

    let mut alerts: Vec<Alert> = [
        critical_margin_alert(&reports, thresholds),
        opportunity_alert(&reports, thresholds),
        supplier_economy_alert(catalog, thresholds),
        cost_gap_alert(&reports),
    ]
    .into_iter()
    .flatten()
    .collect();

    // Stable: equal severities keep the check order above
    alerts.sort_by(|a, b| b.severity.cmp(&a.severity));
    alerts
}

fn critical_margin_alert(reports: &[ItemReport], t: &AlertThresholds) -> Option<Alert> {
    let low: Vec<&ItemReport> = reports
        .iter()
        .filter(|r| r.margin() < t.critical_margin)
        .collect();
    if low.is_empty() {
        return None;
    }

    let any_loss = low.iter().any(|r| r.analysis.is_loss());
    let severity = if any_loss || low.len() >= ESCALATION_COUNT {
        Severity::High
    } else {
        Severity::Medium
    };

    Some(Alert {
        kind: AlertKind::CriticalMargin,
        severity,
        title: "Critical margin".to_string(),
        message: format!(
            "{} item(s) below the {}% margin threshold",
            low.len(),
            t.critical_margin
        ),
        affected: low.iter().map(|r| r.name.clone()).collect(),
        action: "Review prices".to_string(),
    })
}

fn opportunity_alert(reports: &[ItemReport], t: &AlertThresholds) -> Option<Alert> {
    let high: Vec<&ItemReport> = reports
        .iter()
        .filter(|r| r.margin() > t.opportunity_margin)
        .collect();
    if high.is_empty() {
        return None;
    }

    let severity = if high.len() >= ESCALATION_COUNT {
        Severity::Medium
    } else {
        Severity::Low
    };

    Some(Alert {
        kind: AlertKind::PricingOpportunity,
        severity,
        title: "Pricing opportunity".to_string(),
        message: format!(
            "{} item(s) above {}% margin could absorb a promotion",
            high.len(),
            t.opportunity_margin
        ),
        affected: high.iter().map(|r| r.name.clone()).collect(),
        action: "Create promotion".to_string(),
    })
}

fn supplier_economy_alert(catalog: &Catalog, t: &AlertThresholds) -> Option<Alert> {
    let comparisons: Vec<_> =
        supplier::compare_all(&catalog.ingredients, &catalog.supplier_prices, &catalog.suppliers)
            .into_iter()
            .filter(|c| c.has_alternatives() && c.price_spread_percent > t.supplier_spread)
            .collect();
    if comparisons.is_empty() {
        return None;
    }

    let widest = comparisons
        .iter()
        .map(|c| c.price_spread_percent)
        .max()
        .unwrap_or(Decimal::ZERO);
    let severity = if widest >= t.supplier_spread.saturating_mul(Decimal::TWO) {
        Severity::Medium
    } else {
        Severity::Low
    };

    Some(Alert {
        kind: AlertKind::SupplierEconomy,
        severity,
        title: "Supplier economy".to_string(),
        message: format!(
            "{} ingredient(s) with supplier prices varying more than {}%",
            comparisons.len(),
            t.supplier_spread
        ),
        affected: comparisons.iter().map(|c| c.ingredient_name.clone()).collect(),
        action: "Compare suppliers".to_string(),
    })
}

fn cost_gap_alert(reports: &[ItemReport]) -> Option<Alert> {
    let gapped: Vec<&ItemReport> = reports.iter().filter(|r| !r.gaps.is_empty()).collect();
    if gapped.is_empty() {
        return None;
    }

    let any_missing = gapped
        .iter()
        .flat_map(|r| r.gaps.iter())
        .any(|g| g.reason == GapReason::Missing);
    let severity = if any_missing {
        Severity::High
    } else {
        Severity::Medium
    };

    Some(Alert {
        kind: AlertKind::CostGap,
        severity,
        title: "Incomplete cost".to_string(),
        message: format!(
            "{} item(s) depend on missing or inactive entries and are costed too low",
            gapped.len()
        ),
        affected: gapped.iter().map(|r| r.name.clone()).collect(),
        action: "Fix composition".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::*;

    /// Ingredient at R$ 0,02/g and one 250 g menu item (cost R$ 5,00) per
    /// price given.
    fn catalog(prices: &[i64]) -> (Catalog, String) {
        let (mut catalog, acai) = Catalog::new()
            .add_ingredient(IngredientDraft {
                name: "Polpa".to_string(),
                kind: IngredientKind::Base,
                quantity_grams: Decimal::from(1000),
                price_paid: Money::from_cents(2000),
                nominal_price: Money::from_cents(2000),
                active: true,
            })
            .unwrap();

        for (i, cents) in prices.iter().enumerate() {
            let (next, _) = catalog
                .add_menu_item(MenuItemDraft {
                    name: format!("Copo {}", i),
                    category: MenuCategory::Cup,
                    composition: MenuComposition::SingleIngredient {
                        ingredient_id: acai.clone(),
                        quantity_grams: Decimal::from(250),
                    },
                    sale_price: Money::from_cents(*cents),
                    active: true,
                })
                .unwrap();
            catalog = next;
        }
        (catalog, acai)
    }

    fn kinds(alerts: &[Alert]) -> Vec<AlertKind> {
        alerts.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_healthy_catalog_has_no_alerts() {
        // 5,00 cost at 10,00 → 50%
        let (catalog, _) = catalog(&[1000]);
        assert!(scan(&catalog, &AlertThresholds::default()).is_empty());
    }

    #[test]
    fn test_critical_margin() {
        // 6,00 → 16.7%, 4,00 → loss
        let (catalog, _) = catalog(&[1000, 600, 400]);
        let alerts = scan(&catalog, &AlertThresholds::default());

        assert_eq!(kinds(&alerts), vec![AlertKind::CriticalMargin]);
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[0].affected, vec!["Copo 1", "Copo 2"]);
    }

    #[test]
    fn test_critical_margin_without_loss_is_medium() {
        let (catalog, _) = catalog(&[600]);
        let alerts = scan(&catalog, &AlertThresholds::default());
        assert_eq!(alerts[0].severity, Severity::Medium);
    }

    #[test]
    fn test_opportunity() {
        // 20,00 → 75%
        let (catalog, _) = catalog(&[2000]);
        let alerts = scan(&catalog, &AlertThresholds::default());
        assert_eq!(kinds(&alerts), vec![AlertKind::PricingOpportunity]);
        assert_eq!(alerts[0].severity, Severity::Low);
    }

    #[test]
    fn test_thresholds_are_configurable() {
        let (catalog, _) = catalog(&[1000]);
        let strict = AlertThresholds {
            critical_margin: Decimal::from(60),
            ..AlertThresholds::default()
        };
        assert_eq!(kinds(&scan(&catalog, &strict)), vec![AlertKind::CriticalMargin]);
    }

    #[test]
    fn test_supplier_spread() {
        let (catalog, acai) = catalog(&[1000]);
        let (catalog, a) = catalog
            .add_supplier(SupplierDraft {
                name: "A".to_string(),
                contact: None,
                active: true,
            })
            .unwrap();
        let (catalog, b) = catalog
            .add_supplier(SupplierDraft {
                name: "B".to_string(),
                contact: None,
                active: true,
            })
            .unwrap();

        let quote = |supplier: &str, cents: i64| SupplierPriceDraft {
            supplier_id: supplier.to_string(),
            ingredient_id: acai.clone(),
            gross_price: Money::from_cents(cents),
            discounted_price: Money::from_cents(cents),
            unit: PurchaseUnit::Kilogram,
            min_order_quantity: None,
            lead_time_days: None,
            is_default: false,
            available: true,
        };
        let (catalog, _) = catalog.add_supplier_price(quote(&a, 2000)).unwrap();
        let (catalog, _) = catalog.add_supplier_price(quote(&b, 1500)).unwrap();

        let alerts = scan(&catalog, &AlertThresholds::default());
        assert_eq!(kinds(&alerts), vec![AlertKind::SupplierEconomy]);
        // 25% spread ≥ 2 × 10%
        assert_eq!(alerts[0].severity, Severity::Medium);
        assert_eq!(alerts[0].affected, vec!["Polpa"]);
    }

    #[test]
    fn test_cost_gap_alert_on_inactive_ingredient() {
        let (catalog, acai) = catalog(&[1000]);
        let catalog = catalog
            .update_ingredient(
                &acai,
                IngredientDraft {
                    name: "Polpa".to_string(),
                    kind: IngredientKind::Base,
                    quantity_grams: Decimal::from(1000),
                    price_paid: Money::from_cents(2000),
                    nominal_price: Money::from_cents(2000),
                    active: false,
                },
            )
            .unwrap();

        let alerts = scan(&catalog, &AlertThresholds::default());
        // Zero cost also reads as a 100% margin
        assert_eq!(
            kinds(&alerts),
            vec![AlertKind::CostGap, AlertKind::PricingOpportunity]
        );
        assert_eq!(alerts[0].severity, Severity::Medium);
    }

    #[test]
    fn test_missing_ingredient_gap_is_high_and_sorted_first() {
        let (catalog, acai) = catalog(&[1000]);
        let granola_draft = |active| IngredientDraft {
            name: "Granola".to_string(),
            kind: IngredientKind::Topping,
            quantity_grams: Decimal::from(1000),
            price_paid: Money::from_cents(1800),
            nominal_price: Money::from_cents(1800),
            active,
        };
        let (catalog, granola) = catalog.add_ingredient(granola_draft(true)).unwrap();
        let (catalog, _) = catalog
            .add_menu_item(MenuItemDraft {
                name: "Adicional granola".to_string(),
                category: MenuCategory::Extra,
                composition: MenuComposition::SingleIngredient {
                    ingredient_id: granola.clone(),
                    quantity_grams: Decimal::from(30),
                },
                sale_price: Money::from_cents(300),
                active: true,
            })
            .unwrap();
        let mut catalog = catalog
            .update_ingredient(&granola, granola_draft(false))
            .unwrap();
        // Snapshots edited outside the catalog API can hold dangling ids
        catalog.ingredients.retain(|i| i.id != acai);

        let alerts = scan(&catalog, &AlertThresholds::default());
        // Opportunity is checked first but ranks below the gap
        assert_eq!(
            kinds(&alerts),
            vec![AlertKind::CostGap, AlertKind::PricingOpportunity]
        );
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[0].affected, vec!["Copo 0", "Adicional granola"]);
        assert_eq!(alerts[1].severity, Severity::Low);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(AlertThresholds::default().validate().is_ok());

        let inverted = AlertThresholds {
            critical_margin: Decimal::from(80),
            ..AlertThresholds::default()
        };
        assert!(inverted.validate().is_err());

        let out_of_range = AlertThresholds {
            supplier_spread: Decimal::from(150),
            ..AlertThresholds::default()
        };
        assert!(out_of_range.validate().is_err());
    }

    #[test]
    fn test_thresholds_from_partial_toml_like_json() {
        let t: AlertThresholds = serde_json::from_str(r#"{"critical_margin": "25"}"#).unwrap();
        assert_eq!(t.critical_margin, Decimal::from(25));
        assert_eq!(t.opportunity_margin, Decimal::from(70));
    }
}
