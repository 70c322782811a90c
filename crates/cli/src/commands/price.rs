//! Solve for price from a target margin, or margin from a price.

use plate_cost_core::costing::{
    Profitability, batch_price_from_unit, clamp_yield, margin_from_price, price_from_margin,
};
use rust_decimal::Decimal;

use super::emit;
use crate::config::CostingSettings;
use crate::error::CliError;
use crate::render;

/// Price per serving and per batch with the resulting profitability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub unit_price: Decimal,
    pub batch_price: Decimal,
    pub profitability: Profitability,
}

/// Work out the missing side of cost/price/margin for one serving.
///
/// Exactly one of `margin` and `price` must be given.
///
/// # Errors
///
/// Returns `CliError::BadArguments` if both or neither are given, if the
/// margin cannot be reached (outside 0 to 100, or no cost), or if the batch
/// price does not fit in a decimal.
pub fn solve(
    cost_per_unit: Decimal,
    margin: Option<Decimal>,
    price: Option<Decimal>,
    yield_count: i64,
) -> Result<PriceQuote, CliError> {
    let unit_price = match (margin, price) {
        (Some(margin), None) => price_from_margin(margin, cost_per_unit).ok_or_else(|| {
            CliError::BadArguments(format!(
                "margin {margin}% needs a positive cost and must be at least 0 and below 100"
            ))
        })?,
        (None, Some(price)) => price,
        _ => {
            return Err(CliError::BadArguments(
                "give exactly one of --margin or --price".to_string(),
            ));
        }
    };

    let batch_price = batch_price_from_unit(unit_price, clamp_yield(yield_count)).ok_or_else(|| {
        CliError::BadArguments(format!(
            "batch price for {unit_price} x {yield_count} is too large"
        ))
    })?;

    Ok(PriceQuote {
        unit_price,
        batch_price,
        profitability: margin_from_price(unit_price, cost_per_unit),
    })
}

/// Print the solved price.
///
/// # Errors
///
/// See [`solve`].
pub fn run(
    cost_per_unit: Decimal,
    margin: Option<Decimal>,
    price: Option<Decimal>,
    yield_count: i64,
    settings: &CostingSettings,
) -> Result<(), CliError> {
    let quote = solve(cost_per_unit, margin, price, yield_count)?;
    emit(&render::price_quote(&quote, settings.currency));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_price_from_target_margin() {
        let quote = solve(dec!(48.85), Some(dec!(30)), None, 10).unwrap();
        assert_eq!(quote.unit_price.round_dp(2), dec!(69.79));
        assert_eq!(quote.batch_price, quote.unit_price * dec!(10));
        assert_eq!(quote.profitability.profit_margin_percent.round_dp(6), dec!(30));
    }

    #[test]
    fn test_margin_from_price() {
        let quote = solve(dec!(48.85), None, Some(dec!(60)), 0).unwrap();
        assert_eq!(quote.batch_price, dec!(60));
        assert_eq!(quote.profitability.gross_profit, dec!(11.15));
    }

    #[test]
    fn test_unreachable_margin() {
        assert!(matches!(
            solve(dec!(10), Some(dec!(100)), None, 1),
            Err(CliError::BadArguments(_))
        ));
        assert!(matches!(
            solve(dec!(0), Some(dec!(20)), None, 1),
            Err(CliError::BadArguments(_))
        ));
    }

    #[test]
    fn test_batch_price_overflow_is_an_argument_error() {
        let err = solve(
            dec!(0.0575),
            Some(dec!(99.99999999999999999999999999)),
            None,
            1000,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::BadArguments(msg) if msg.contains("too large")));
    }

    #[test]
    fn test_needs_exactly_one_input() {
        assert!(solve(dec!(10), None, None, 1).is_err());
        assert!(solve(dec!(10), Some(dec!(20)), Some(dec!(15)), 1).is_err());
    }
}
