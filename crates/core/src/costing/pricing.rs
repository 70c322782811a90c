//! Conversions between selling price and profit margin.
//!
//! The forward direction (price → margin) is always defined. The inverse
//! (margin → price) only exists for margins in `[0, 100)` and a positive cost;
//! outside that range it returns `None` and the caller keeps its old price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Profit on one unit at a given selling price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profitability {
    /// Selling price minus cost. Negative means a loss.
    pub gross_profit: Decimal,
    /// Gross profit as a percentage of the selling price; 0 when the price is
    /// not positive.
    pub profit_margin_percent: Decimal,
}

/// Derive gross profit and margin from a selling price.
#[must_use]
pub fn margin_from_price(selling_price: Decimal, cost_per_unit: Decimal) -> Profitability {
    let gross_profit = selling_price - cost_per_unit;
    let profit_margin_percent = if selling_price > Decimal::ZERO {
        gross_profit
            .checked_mul(HUNDRED)
            .and_then(|scaled| scaled.checked_div(selling_price))
            .or_else(|| {
                gross_profit
                    .checked_div(selling_price)
                    .and_then(|ratio| ratio.checked_mul(HUNDRED))
            })
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    Profitability {
        gross_profit,
        profit_margin_percent,
    }
}

/// Solve for the selling price that yields `margin_percent` on `cost_per_unit`.
///
/// Returns `None` when `margin_percent` is negative or at least 100, when
/// the cost is not positive, or when the price is too large to represent.
///
/// ```
/// use plate_cost_core::costing::price_from_margin;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(price_from_margin(dec!(20), dec!(100)), Some(dec!(125)));
/// assert_eq!(price_from_margin(dec!(100), dec!(100)), None);
/// ```
#[must_use]
pub fn price_from_margin(margin_percent: Decimal, cost_per_unit: Decimal) -> Option<Decimal> {
    if margin_percent < Decimal::ZERO || margin_percent >= HUNDRED || cost_per_unit <= Decimal::ZERO
    {
        return None;
    }
    // cost / (1 - m/100), rearranged so round figures stay exact.
    cost_per_unit
        .checked_mul(HUNDRED)?
        .checked_div(HUNDRED - margin_percent)
}

/// Batch selling price for a per-serving price, or `None` if it overflows.
#[must_use]
pub fn batch_price_from_unit(unit_price: Decimal, yield_count: u32) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(yield_count.max(1)))
}

/// Per-serving selling price for a batch price.
#[must_use]
pub fn unit_price_from_batch(batch_price: Decimal, yield_count: u32) -> Decimal {
    batch_price / Decimal::from(yield_count.max(1))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_margin_from_price() {
        let profit = margin_from_price(dec!(125), dec!(100));
        assert_eq!(profit.gross_profit, dec!(25));
        assert_eq!(profit.profit_margin_percent, dec!(20));
    }

    #[test]
    fn test_margin_is_zero_without_price() {
        let profit = margin_from_price(Decimal::ZERO, dec!(40));
        assert_eq!(profit.gross_profit, dec!(-40));
        assert_eq!(profit.profit_margin_percent, Decimal::ZERO);

        let profit = margin_from_price(dec!(-5), dec!(40));
        assert_eq!(profit.profit_margin_percent, Decimal::ZERO);
    }

    #[test]
    fn test_price_from_margin() {
        assert_eq!(price_from_margin(dec!(20), dec!(100)), Some(dec!(125)));
        assert_eq!(price_from_margin(Decimal::ZERO, dec!(48.85)), Some(dec!(48.85)));
        assert_eq!(price_from_margin(dec!(50), dec!(48.85)), Some(dec!(97.7)));
    }

    #[test]
    fn test_price_from_margin_rejects_out_of_domain() {
        for margin in [dec!(100), dec!(150), dec!(-5)] {
            assert_eq!(price_from_margin(margin, dec!(100)), None);
        }
        assert_eq!(price_from_margin(dec!(20), Decimal::ZERO), None);
        assert_eq!(price_from_margin(dec!(20), dec!(-1)), None);
    }

    #[test]
    fn test_price_from_margin_just_below_hundred() {
        let price = price_from_margin(dec!(99.99), dec!(1)).unwrap();
        assert_eq!(price, dec!(10000));
    }

    #[test]
    fn test_batch_unit_price_conversion() {
        assert_eq!(batch_price_from_unit(dec!(60), 10), Some(dec!(600)));
        assert_eq!(unit_price_from_batch(dec!(600), 10), dec!(60));
        assert_eq!(unit_price_from_batch(dec!(600), 0), dec!(600));
    }

    #[test]
    fn test_oversized_prices_are_none() {
        assert_eq!(batch_price_from_unit(Decimal::MAX, 2), None);
        assert_eq!(batch_price_from_unit(Decimal::MAX, 1), Some(Decimal::MAX));
        assert_eq!(price_from_margin(dec!(20), Decimal::MAX), None);

        let price = price_from_margin(dec!(99.99999999999999999999999999), dec!(0.0575)).unwrap();
        assert_eq!(batch_price_from_unit(price, 1000), None);
    }

    #[test]
    fn test_margin_of_huge_price_does_not_overflow() {
        let profit = margin_from_price(Decimal::MAX, dec!(1));
        assert_eq!(profit.profit_margin_percent.round(), dec!(100));
    }
}
