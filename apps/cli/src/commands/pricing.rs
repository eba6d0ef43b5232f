//! `suggest` and `scenarios`: pricing helpers that need no catalog.

use std::fmt::Write as _;

use acai_core::pricing::{self, MarginScenario, PriceAnalysis, PricingStrategy};
use acai_core::psychological;
use acai_core::Money;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{cell_right, percent, Format};
use crate::error::AppResult;

#[derive(Debug, Serialize)]
struct Suggestion {
    target_margin: Decimal,
    /// Exact price for the target margin.
    exact: PriceAnalysis,
    /// Price after snapping to an attractive ending.
    psychological: PriceAnalysis,
    /// Attractive prices around the exact one.
    alternatives: Vec<Money>,
}

pub fn suggest(cost: Decimal, target_margin: Decimal, format: Format) -> AppResult<String> {
    let cost = Money::new(cost);
    let exact = pricing::suggest_price(cost, PricingStrategy::FixedMargin(target_margin))?;
    let snapped = pricing::suggest_price(cost, PricingStrategy::Psychological(target_margin))?;

    let suggestion = Suggestion {
        target_margin,
        exact: PriceAnalysis::new(cost, exact),
        psychological: PriceAnalysis::new(cost, snapped),
        alternatives: psychological::suggest_attractive_prices(exact),
    };

    format.render(&suggestion, |s| {
        let mut out = String::new();
        let _ = writeln!(out, "Cost:          {}", s.exact.cost);
        let _ = writeln!(out, "Target margin: {}", percent(s.target_margin));
        let _ = writeln!(
            out,
            "Exact price:   {}  (markup {}, {} over cost)",
            s.exact.price,
            s.exact.markup,
            percent(s.exact.markup_percent)
        );
        let _ = writeln!(
            out,
            "Suggested:     {}  (margin {})",
            s.psychological.price,
            percent(s.psychological.margin)
        );
        if !s.alternatives.is_empty() {
            let list: Vec<String> = s.alternatives.iter().map(|p| p.to_string()).collect();
            let _ = write!(out, "Alternatives:  {}", list.join("  "));
        }
        out.trim_end().to_string()
    })
}

pub fn scenarios(cost: Decimal, margins: &[Decimal], format: Format) -> AppResult<String> {
    let scenarios = pricing::compare_scenarios(Money::new(cost), margins)?;

    format.render(scenarios.as_slice(), |rows: &[MarginScenario]| {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {} {} {} {} {}",
            cell_right("Margin", 7),
            cell_right("Price", 11),
            cell_right("Markup", 11),
            cell_right("Markup %", 9),
            cell_right("Attractive", 11),
            cell_right("Real margin", 11),
        );
        for row in rows {
            let attractive = row
                .psychological_price
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());
            let real = row
                .psychological_margin
                .map(percent)
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "{} {} {} {} {} {}",
                cell_right(&percent(row.target_margin), 7),
                cell_right(&row.price.to_string(), 11),
                cell_right(&row.markup.to_string(), 11),
                cell_right(&percent(row.markup_percent), 9),
                cell_right(&attractive, 11),
                cell_right(&real, 11),
            );
        }
        out.trim_end().to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use acai_core::CoreError;

    #[test]
    fn test_suggest_reference_case() {
        let json = suggest(Decimal::from(10), Decimal::from(50), Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let price: Decimal = value["exact"]["price"].as_str().unwrap().parse().unwrap();
        assert_eq!(price, Decimal::from(20));
    }

    #[test]
    fn test_suggest_text() {
        let text = suggest(Decimal::new(440, 2), Decimal::from(60), Format::Text).unwrap();
        assert!(text.contains("Cost:          R$ 4,40"));
        assert!(text.contains("Exact price:   R$ 11,00"));
    }

    #[test]
    fn test_unreachable_margin() {
        let err = suggest(Decimal::from(10), Decimal::from(100), Format::Text).unwrap_err();
        assert!(matches!(
            err,
            AppError::Core(CoreError::UnreachableMargin { .. })
        ));
    }

    #[test]
    fn test_margin_just_below_hundred_is_rejected() {
        let margin: Decimal = "99.99999999999999999999999999".parse().unwrap();
        let err = suggest(Decimal::from(10), margin, Format::Text).unwrap_err();
        assert!(matches!(err, AppError::Core(CoreError::Overflow { .. })));
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err = scenarios(Decimal::from(10), &[Decimal::from(50), margin], Format::Json)
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_scenarios_one_row_per_margin() {
        let margins = [Decimal::from(40), Decimal::from(50), Decimal::from(60)];
        let text = scenarios(Decimal::from(10), &margins, Format::Text).unwrap();
        assert_eq!(text.lines().count(), 1 + margins.len());
        assert!(text.contains("R$ 20,00"));
    }
}
