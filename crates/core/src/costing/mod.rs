//! Recipe cost and profitability calculator.
//!
//! Figures flow in one direction: purchases are rolled up into average unit
//! costs ([`aggregate`]), recipe lines plus labor and overhead give a batch
//! cost ([`batch`]), the batch cost divided by the yield gives a per-serving
//! cost ([`per_unit`]), and the per-serving cost combined with a selling price
//! or a target margin gives the profit figures ([`pricing`]).
//!
//! Every function here is pure and total. None of them round: rounding to
//! cents is a display concern handled by [`crate::format_money`].

pub mod aggregate;
pub mod batch;
pub mod per_unit;
pub mod pricing;

pub use aggregate::{AggregateOptions, AggregatedIngredient, PurchasedItem, aggregate, aggregate_with};
pub use batch::{BatchCost, RecipeIngredientLine, compute_batch_cost};
pub use per_unit::{PerUnitCost, clamp_yield, per_unit};
pub use pricing::{
    Profitability, batch_price_from_unit, margin_from_price, price_from_margin,
    unit_price_from_batch,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Overhead rate applied when a business has not configured its own (15%).
pub const DEFAULT_OVERHEAD_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Everything needed to cost a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCostInputs {
    pub ingredient_lines: Vec<RecipeIngredientLine>,
    #[serde(default)]
    pub prep_time_minutes: Decimal,
    #[serde(default)]
    pub labor_rate_per_hour: Decimal,
    /// Servings per batch. Values below 1 are treated as 1.
    #[serde(default = "default_yield")]
    pub yield_count: u32,
    #[serde(default = "default_overhead_rate")]
    pub overhead_rate: Decimal,
    #[serde(default)]
    pub batch_selling_price: Decimal,
}

const fn default_yield() -> u32 {
    1
}

const fn default_overhead_rate() -> Decimal {
    DEFAULT_OVERHEAD_RATE
}

/// Derived cost and profit figures for a recipe.
///
/// `gross_profit` and `profit_margin_percent` are per serving. A negative
/// gross profit is a loss and is reported as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCostResult {
    pub material_cost: Decimal,
    pub labor_cost: Decimal,
    pub overhead_allocation: Decimal,
    pub total_cost: Decimal,
    pub cost_per_unit: Decimal,
    pub selling_price_per_unit: Decimal,
    pub gross_profit: Decimal,
    pub profit_margin_percent: Decimal,
}

impl RecipeCostInputs {
    /// Run the full calculation: batch cost, per-serving cost, then profit.
    #[must_use]
    pub fn evaluate(&self) -> RecipeCostResult {
        let yield_count = self.yield_count.max(1);
        let batch = compute_batch_cost(
            &self.ingredient_lines,
            self.prep_time_minutes,
            self.labor_rate_per_hour,
            self.overhead_rate,
        );
        let unit = per_unit(&batch, yield_count);
        let selling_price_per_unit = unit_price_from_batch(self.batch_selling_price, yield_count);
        let profit = margin_from_price(selling_price_per_unit, unit.total_cost_per_unit);

        RecipeCostResult {
            material_cost: batch.material_cost,
            labor_cost: batch.labor_cost,
            overhead_allocation: batch.overhead_allocation,
            total_cost: batch.total_cost,
            cost_per_unit: unit.total_cost_per_unit,
            selling_price_per_unit,
            gross_profit: profit.gross_profit,
            profit_margin_percent: profit.profit_margin_percent,
        }
    }
}
