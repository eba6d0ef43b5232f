//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    22.00 / 1000 × 200 = 4.3999999999999995  ❌ WRONG!                   │
//! │                                                                         │
//! │  Why not integer centavos?                                              │
//! │    Price per gram is often a fraction of a centavo (R$ 0.022/g).        │
//! │    Rounding it to centavos would make a 200 g portion cost R$ 4.00.     │
//! │                                                                         │
//! │  OUR SOLUTION: Exact decimals, rounded only for display                 │
//! │    22.00 / 1000 = 0.022 × 200 = 4.400                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use acai_core::money::Money;
//!
//! let price = Money::from_cents(1099); // R$ 10,99
//!
//! let doubled = price * 2;
//! let total = price + Money::from_cents(500);
//! assert_eq!(doubled.cents(), 2198);
//! assert_eq!(total.cents(), 1599);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in reais.
///
/// ## Design Decisions
/// - **Decimal (signed)**: negative values are meaningful (negative markup
///   when an item sells below cost)
/// - **Unrounded**: sub-centavo precision is kept through cost derivation;
///   only [`Money::rounded`], [`Money::cents`] and `Display` round
/// - **Serialized as a string**: `"4.40"` survives any JSON consumer
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Ingredient.nominal_price ──► price per gram ──► recipe / cup cost      │
/// │                                                                         │
/// │  Packaging lot price ──► unit price ──► cup cost                        │
/// │                                                                         │
/// │  MenuItem.sale_price − cost ──► markup ──► margin % ──► alerts          │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps an exact decimal amount in reais.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use acai_core::money::Money;
    ///
    /// let price = Money::from_cents(2200); // R$ 22,00
    /// assert_eq!(price.to_string(), "R$ 22,00");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Creates a Money value from reais and centavos.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -R$ 5,50.
    pub fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money::from_cents(major.saturating_mul(100).saturating_sub(minor))
        } else {
            Money::from_cents(major.saturating_mul(100).saturating_add(minor))
        }
    }

    /// Returns the exact amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount in centavos, rounded half to even.
    pub fn cents(&self) -> i64 {
        self.rounded()
            .0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|c| c.to_i64())
            .unwrap_or(if self.0.is_sign_negative() { i64::MIN } else { i64::MAX })
    }

    /// Rounds to centavos using Bankers Rounding (round half to even).
    ///
    /// ```rust
    /// use acai_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Money::new(Decimal::new(4125, 3)).rounded().cents(), 412);
    /// assert_eq!(Money::new(Decimal::new(4135, 3)).rounded().cents(), 414);
    /// ```
    pub fn rounded(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
        )
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a (possibly fractional) quantity.
    ///
    /// ```rust
    /// use acai_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let per_gram = Money::new(Decimal::new(22, 3)); // R$ 0,022/g
    /// assert_eq!(per_gram.multiply_quantity(Decimal::from(200)).cents(), 440);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: Decimal) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Splits the amount over `qty` units.
    ///
    /// Returns zero when `qty` is zero or negative, the same guard every
    /// derived unit price in the catalog relies on.
    pub fn per_unit(&self, qty: Decimal) -> Self {
        if qty <= Decimal::ZERO {
            return Money::zero();
        }
        Money(saturating_div(self.0, qty))
    }

    /// Expresses `self` as a percentage of `whole`; zero when `whole` is not
    /// positive.
    pub fn percent_of(&self, whole: Money) -> Decimal {
        if !whole.is_positive() {
            return Decimal::ZERO;
        }
        saturating_div(self.0, whole.0).saturating_mul(Decimal::ONE_HUNDRED)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ```rust
    /// use acai_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let gross = Money::from_cents(10000);
    /// assert_eq!(gross.apply_percentage_discount(Decimal::from(10)).cents(), 9000);
    /// ```
    pub fn apply_percentage_discount(&self, percent: Decimal) -> Money {
        let discount = saturating_div(self.0.saturating_mul(percent), Decimal::ONE_HUNDRED);
        Money(self.0.saturating_sub(discount))
    }
}

// =============================================================================
// Bounded Arithmetic
// =============================================================================
//
// Amounts come from user input, so every operation clamps at the
// representable range instead of panicking on overflow.

/// `dividend / divisor`, clamped to `Decimal::MIN..=Decimal::MAX`; 0 for a
/// zero divisor.
pub(crate) fn saturating_div(dividend: Decimal, divisor: Decimal) -> Decimal {
    if divisor.is_zero() {
        return Decimal::ZERO;
    }
    dividend.checked_div(divisor).unwrap_or_else(|| {
        if dividend.is_sign_negative() != divisor.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// Sum that clamps instead of overflowing.
pub(crate) fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Brazilian display format: `R$ 4,40`, `-R$ 5,50`.
///
/// ## Note
/// This is for reports and logs. A UI should format with its own locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        write!(f, "{}R$ {},{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by a whole quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }
}

/// Multiplication by a decimal quantity (grams, units).
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: Decimal) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
