//! Per-serving cost derived from a batch cost and its yield.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BatchCost;

/// Batch cost split across the servings it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerUnitCost {
    pub material_cost_per_unit: Decimal,
    pub labor_cost_per_unit: Decimal,
    pub overhead_per_unit: Decimal,
    pub total_cost_per_unit: Decimal,
}

/// Floor a user-entered yield at 1.
///
/// Form inputs can be empty, zero or negative; costing always divides by at
/// least one serving.
#[must_use]
pub fn clamp_yield(raw: i64) -> u32 {
    u32::try_from(raw.max(1)).unwrap_or(u32::MAX)
}

/// Divide every batch figure by `yield_count`.
///
/// A yield of 0 is treated as 1; callers are expected to pass a value that
/// went through [`clamp_yield`].
#[must_use]
pub fn per_unit(batch: &BatchCost, yield_count: u32) -> PerUnitCost {
    let servings = Decimal::from(yield_count.max(1));
    PerUnitCost {
        material_cost_per_unit: batch.material_cost / servings,
        labor_cost_per_unit: batch.labor_cost / servings,
        overhead_per_unit: batch.overhead_allocation / servings,
        total_cost_per_unit: batch.total_cost / servings,
    }
}
