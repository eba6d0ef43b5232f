//! # Pricing Module
//!
//! Margin, markup and price-suggestion arithmetic.
//!
//! ## One Margin Definition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cost R$ 10,00      price R$ 20,00                                      │
//! │                                                                         │
//! │  markup         = price − cost               = R$ 10,00                 │
//! │  margin         = (price − cost) / price     = 50%   ◄── used by        │
//! │                                                          stats, alerts, │
//! │                                                          reports        │
//! │  markup percent = (price − cost) / cost      = 100%  (shown alongside,  │
//! │                                                       never "margin")   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No rounding happens here; display code rounds to centavos.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::psychological;

// =============================================================================
// Basic Arithmetic
// =============================================================================

/// Margin as a percentage of the sale price.
///
/// Returns `(price - cost) / price * 100`, or 0 when `price` is not positive.
///
/// ```rust
/// use acai_core::money::Money;
/// use acai_core::pricing::margin;
/// use rust_decimal::Decimal;
///
/// assert_eq!(margin(Money::from_cents(1000), Money::from_cents(2000)), Decimal::from(50));
/// assert_eq!(margin(Money::from_cents(1000), Money::zero()), Decimal::ZERO);
/// ```
pub fn margin(cost: Money, price: Money) -> Decimal {
    markup(cost, price).percent_of(price)
}

/// Absolute difference between sale price and cost. Negative when selling
/// below cost.
#[inline]
pub fn markup(cost: Money, price: Money) -> Money {
    price - cost
}

/// Markup as a percentage of the cost; 0 when `cost` is not positive.
pub fn markup_percent(cost: Money, price: Money) -> Decimal {
    markup(cost, price).percent_of(cost)
}

/// Price that yields `desired_margin` percent over `cost`.
///
/// ```text
/// price = cost / (1 - desired_margin / 100)
///
/// cost R$ 10,00, margin 50% → R$ 20,00
/// ```
///
/// ## Errors
/// [`CoreError::UnreachableMargin`] when the margin is outside `[0, 100)`,
/// [`CoreError::Overflow`] when the price is too large to represent.
pub fn price_for_margin(cost: Money, desired_margin: Decimal) -> CoreResult<Money> {
    if desired_margin < Decimal::ZERO || desired_margin >= Decimal::ONE_HUNDRED {
        return Err(CoreError::UnreachableMargin {
            margin: desired_margin,
        });
    }

    let divisor = Decimal::ONE - desired_margin / Decimal::ONE_HUNDRED;
    cost.amount()
        .checked_div(divisor)
        .map(Money::new)
        .ok_or(CoreError::Overflow {
            operation: "price_for_margin",
        })
}

/// Unit price when buying in lots: `lot_price / lot_quantity`, 0 for an
/// empty lot.
///
/// ```rust
/// use acai_core::money::Money;
/// use acai_core::pricing::unit_price_from_lot;
/// use rust_decimal::Decimal;
///
/// // 100 spoons for R$ 8,00
/// let unit = unit_price_from_lot(Money::from_cents(800), Decimal::from(100));
/// assert_eq!(unit.cents(), 8);
/// ```
pub fn unit_price_from_lot(lot_price: Money, lot_quantity: Decimal) -> Money {
    lot_price.per_unit(lot_quantity)
}

// =============================================================================
// Price Analysis
// =============================================================================

/// Every derived pricing figure for one cost/price pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceAnalysis {
    pub cost: Money,
    pub price: Money,
    pub markup: Money,
    #[ts(type = "string")]
    pub margin: Decimal,
    #[ts(type = "string")]
    pub markup_percent: Decimal,
}

impl PriceAnalysis {
    pub fn new(cost: Money, price: Money) -> Self {
        PriceAnalysis {
            cost,
            price,
            markup: markup(cost, price),
            margin: margin(cost, price),
            markup_percent: markup_percent(cost, price),
        }
    }

    /// True when the item sells below its cost.
    pub fn is_loss(&self) -> bool {
        self.markup.is_negative()
    }
}

// =============================================================================
// Strategies
// =============================================================================

/// How to turn a cost into a suggested price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "strategy", content = "margin", rename_all = "snake_case")]
pub enum PricingStrategy {
    /// Exact price for the target margin.
    FixedMargin(#[ts(type = "string")] Decimal),
    /// Target-margin price snapped to the closest attractive price.
    Psychological(#[ts(type = "string")] Decimal),
}

/// Suggests a sale price for `cost` under `strategy`.
///
/// The psychological strategy falls back to the exact price when no
/// attractive candidate lies close enough to it.
pub fn suggest_price(cost: Money, strategy: PricingStrategy) -> CoreResult<Money> {
    match strategy {
        PricingStrategy::FixedMargin(target) => price_for_margin(cost, target),
        PricingStrategy::Psychological(target) => {
            let exact = price_for_margin(cost, target)?;
            Ok(psychological::nearest_attractive_price(exact).unwrap_or(exact))
        }
    }
}

// =============================================================================
// Scenario Comparison
// =============================================================================

/// Outcome of pricing one cost at one target margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MarginScenario {
    #[ts(type = "string")]
    pub target_margin: Decimal,
    /// Exact price for the target margin.
    pub price: Money,
    pub markup: Money,
    #[ts(type = "string")]
    pub markup_percent: Decimal,
    /// Closest attractive price, if any lies in range.
    pub psychological_price: Option<Money>,
    /// Margin actually obtained when selling at the attractive price.
    #[ts(type = "string | null")]
    pub psychological_margin: Option<Decimal>,
}

/// Prices `cost` at each of `margins`, for side-by-side comparison.
///
/// ```rust
/// use acai_core::money::Money;
/// use acai_core::pricing::compare_scenarios;
/// use rust_decimal::Decimal;
///
/// let scenarios = compare_scenarios(
///     Money::from_cents(1000),
///     &[Decimal::from(40), Decimal::from(50)],
/// ).unwrap();
/// assert_eq!(scenarios[1].price.cents(), 2000);
/// ```
pub fn compare_scenarios(cost: Money, margins: &[Decimal]) -> CoreResult<Vec<MarginScenario>> {
    margins
        .iter()
        .map(|&target| {
            let price = price_for_margin(cost, target)?;
            let attractive = psychological::nearest_attractive_price(price);

            Ok(MarginScenario {
                target_margin: target,
                price,
                markup: markup(cost, price),
                markup_percent: markup_percent(cost, price),
                psychological_price: attractive,
                psychological_margin: attractive.map(|p| margin(cost, p)),
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
