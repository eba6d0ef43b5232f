//! # Psychological Pricing
//!
//! Suggests "attractive" prices near a computed base price.
//!
//! ```text
//! base R$ 15,50 → window [R$ 13,95 .. R$ 17,825]
//!
//! candidates: 14,90 14,99 15,90 15,99 16,90 16,99   (.90/.99 endings)
//!             15,00 16,00                          (round numbers)
//!             14,90                                (tier anchors)
//!
//! keep the 4 closest to the base, ascending:
//!             15,00  15,90  15,99  16,00
//! ```
//!
//! Cosmetic heuristic, nothing depends on the exact candidate set.

use rust_decimal::Decimal;

use crate::money::Money;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 4;

/// Price points customers recognise on delivery menus.
const TIER_ANCHORS: [i64; 9] = [490, 990, 1490, 1990, 2490, 2990, 3490, 3990, 4990];

/// Lower bound of the suggestion window, as a fraction of the base.
fn window_floor() -> Decimal {
    Decimal::new(90, 2)
}

/// Upper bound of the suggestion window, as a fraction of the base.
fn window_ceiling() -> Decimal {
    Decimal::new(115, 2)
}

/// Returns up to [`MAX_SUGGESTIONS`] attractive prices within
/// `[0.9 × base, 1.15 × base]`, deduplicated, in ascending order.
///
/// ```rust
/// use acai_core::money::Money;
/// use acai_core::psychological::suggest_attractive_prices;
///
/// let prices = suggest_attractive_prices(Money::from_cents(1550));
/// assert!(prices.contains(&Money::from_cents(1590)));
/// assert!(prices.len() <= 4);
/// assert!(suggest_attractive_prices(Money::zero()).is_empty());
/// ```
pub fn suggest_attractive_prices(base: Money) -> Vec<Money> {
    if !base.is_positive() {
        return Vec::new();
    }

    let b = base.amount();
    let lower = b.saturating_mul(window_floor());
    let upper = b.saturating_mul(window_ceiling());

    let mut candidates = candidate_prices(b);
    candidates.retain(|c| *c >= lower && *c <= upper);
    candidates.sort();
    candidates.dedup();

    // Closest to the base first; ties go to the cheaper price
    candidates.sort_by(|x, y| {
        (x.saturating_sub(b).abs(), *x).cmp(&(y.saturating_sub(b).abs(), *y))
    });
    candidates.truncate(MAX_SUGGESTIONS);
    candidates.sort();

    candidates.into_iter().map(Money::new).collect()
}

/// The suggestion closest to `base`; on a tie, the higher price.
pub fn nearest_attractive_price(base: Money) -> Option<Money> {
    let b = base.amount();
    suggest_attractive_prices(base)
        .into_iter()
        .min_by(|x, y| {
            let dx = x.amount().saturating_sub(b).abs();
            let dy = y.amount().saturating_sub(b).abs();
            dx.cmp(&dy).then_with(|| y.cmp(x))
        })
}

fn candidate_prices(base: Decimal) -> Vec<Decimal> {
    let whole = base.floor();
    let ninety = Decimal::new(90, 2);
    let ninety_nine = Decimal::new(99, 2);

    let mut candidates = Vec::with_capacity(8 + TIER_ANCHORS.len());

    for offset in [-1i64, 0, 1] {
        let reais = whole.saturating_add(Decimal::from(offset));
        if reais < Decimal::ZERO {
            continue;
        }
        candidates.push(reais.saturating_add(ninety));
        candidates.push(reais.saturating_add(ninety_nine));
    }

    candidates.push(whole);
    candidates.push(base.ceil());
    candidates.extend(TIER_ANCHORS.iter().map(|&cents| Decimal::new(cents, 2)));

    candidates
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn brl(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    #[test]
    fn test_suggestions_for_typical_cup() {
        let prices = suggest_attractive_prices(brl(1550));
        assert_eq!(prices, vec![brl(1500), brl(1590), brl(1599), brl(1600)]);
    }

    #[test]
    fn test_suggestions_stay_in_window() {
        for cents in [199, 990, 1234, 1875, 2999, 4500] {
            let base = brl(cents);
            for price in suggest_attractive_prices(base) {
                assert!(price.amount() >= base.amount() * window_floor());
                assert!(price.amount() <= base.amount() * window_ceiling());
            }
        }
    }

    #[test]
    fn test_suggestions_are_unique_and_ascending() {
        // 10.00 produces 10.00 twice (floor and ceil) and 9.90 twice
        // (ending and anchor)
        let prices = suggest_attractive_prices(brl(1000));
        let mut sorted = prices.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(prices, sorted);
        assert!(prices.contains(&brl(990)));
        assert!(prices.contains(&brl(1000)));
    }

    #[test]
    fn test_non_positive_base() {
        assert!(suggest_attractive_prices(Money::zero()).is_empty());
        assert!(suggest_attractive_prices(brl(-500)).is_empty());
        assert!(nearest_attractive_price(Money::zero()).is_none());
    }

    #[test]
    fn test_nearest_attractive_price() {
        assert_eq!(nearest_attractive_price(brl(1550)), Some(brl(1590)));
        assert_eq!(nearest_attractive_price(brl(1980)), Some(brl(1990)));
        // A round base is its own best candidate
        assert_eq!(nearest_attractive_price(brl(2000)), Some(brl(2000)));
    }

    #[test]
    fn test_tiny_base_may_have_no_candidate() {
        // Window [0.45, 0.575]: no ending, round number or anchor fits
        assert!(suggest_attractive_prices(brl(50)).is_empty());
    }
}
