//! Full-batch cost of a recipe: materials, labor and overhead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AggregatedIngredient;
use crate::{IngredientId, Unit};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// One ingredient on a recipe, with the cost it contributes to a batch.
///
/// `line_total_cost` is always `quantity_required × unit_cost`; the fields are
/// private so the total cannot drift from its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "LineInput")]
pub struct RecipeIngredientLine {
    ingredient_id: IngredientId,
    ingredient_name: String,
    quantity_required: Decimal,
    unit: Unit,
    unit_cost: Decimal,
    line_total_cost: Decimal,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineInput {
    ingredient_id: IngredientId,
    ingredient_name: String,
    quantity_required: Decimal,
    #[serde(default)]
    unit: Unit,
    #[serde(default)]
    unit_cost: Decimal,
}

impl From<LineInput> for RecipeIngredientLine {
    fn from(input: LineInput) -> Self {
        Self::new(
            input.ingredient_id,
            input.ingredient_name,
            input.quantity_required,
            input.unit,
            input.unit_cost,
        )
    }
}

impl RecipeIngredientLine {
    /// Create a line and compute its total.
    #[must_use]
    pub fn new(
        ingredient_id: IngredientId,
        ingredient_name: impl Into<String>,
        quantity_required: Decimal,
        unit: Unit,
        unit_cost: Decimal,
    ) -> Self {
        Self {
            ingredient_id,
            ingredient_name: ingredient_name.into(),
            quantity_required,
            unit,
            unit_cost,
            line_total_cost: quantity_required * unit_cost,
        }
    }

    /// Create a line priced at an ingredient's average purchase cost.
    #[must_use]
    pub fn from_aggregated(
        ingredient_id: IngredientId,
        ingredient: &AggregatedIngredient,
        quantity_required: Decimal,
    ) -> Self {
        Self::new(
            ingredient_id,
            ingredient.name.clone(),
            quantity_required,
            ingredient.unit,
            ingredient.average_unit_price,
        )
    }

    #[must_use]
    pub const fn ingredient_id(&self) -> IngredientId {
        self.ingredient_id
    }

    #[must_use]
    pub fn ingredient_name(&self) -> &str {
        &self.ingredient_name
    }

    #[must_use]
    pub const fn quantity_required(&self) -> Decimal {
        self.quantity_required
    }

    #[must_use]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    #[must_use]
    pub const fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }

    #[must_use]
    pub const fn line_total_cost(&self) -> Decimal {
        self.line_total_cost
    }

    /// Change the required quantity and recompute the line total.
    pub fn set_quantity(&mut self, quantity_required: Decimal) {
        self.quantity_required = quantity_required;
        self.line_total_cost = quantity_required * self.unit_cost;
    }

    /// Change the unit cost and recompute the line total.
    pub fn set_unit_cost(&mut self, unit_cost: Decimal) {
        self.unit_cost = unit_cost;
        self.line_total_cost = self.quantity_required * unit_cost;
    }
}

/// Cost of producing one full batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCost {
    pub material_cost: Decimal,
    pub labor_cost: Decimal,
    pub overhead_allocation: Decimal,
    /// Always `material_cost + labor_cost + overhead_allocation`.
    pub total_cost: Decimal,
}

/// Compute the cost of one batch.
///
/// - material: sum of the line totals
/// - labor: `prep_time_minutes / 60 × labor_rate_per_hour`
/// - overhead: `material × overhead_rate`
///
/// Inputs are not validated or clamped; that belongs to whoever collected
/// them.
#[must_use]
pub fn compute_batch_cost(
    lines: &[RecipeIngredientLine],
    prep_time_minutes: Decimal,
    labor_rate_per_hour: Decimal,
    overhead_rate: Decimal,
) -> BatchCost {
    let material_cost: Decimal = lines.iter().map(RecipeIngredientLine::line_total_cost).sum();
    // Multiplying before dividing keeps whole-minute figures exact.
    let labor_cost = prep_time_minutes * labor_rate_per_hour / MINUTES_PER_HOUR;
    let overhead_allocation = material_cost * overhead_rate;

    BatchCost {
        material_cost,
        labor_cost,
        overhead_allocation,
        total_cost: material_cost + labor_cost + overhead_allocation,
    }
}
