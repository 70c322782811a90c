//! In-memory recipe draft driven by tagged field edits.
//!
//! The create and edit screens keep one [`RecipeDraft`] and feed every
//! keystroke through [`RecipeDraft::apply`]. Prices are held per serving and
//! per batch; after any edit `batch_selling_price == unit_selling_price ×
//! yield`. Whichever pricing field was edited last decides the other one.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::costing::{
    AggregatedIngredient, BatchCost, DEFAULT_OVERHEAD_RATE, PerUnitCost, RecipeCostInputs,
    RecipeCostResult, RecipeIngredientLine, batch_price_from_unit, clamp_yield,
    compute_batch_cost, per_unit, price_from_margin, unit_price_from_batch,
};
use crate::recipe::{NewRecipe, Recipe, RecipeIngredient};
use crate::{IngredientId, RecipeId};

/// Errors for edits that reference ingredient lines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// The ingredient is already on the recipe.
    #[error("ingredient {0} is already on this recipe")]
    DuplicateIngredient(IngredientId),
    /// No line for this ingredient.
    #[error("ingredient {0} is not on this recipe")]
    UnknownIngredient(IngredientId),
}

/// One user edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    NameEdited(String),
    IngredientAdded(RecipeIngredientLine),
    IngredientQuantityEdited {
        ingredient_id: IngredientId,
        quantity: Decimal,
    },
    IngredientRemoved(IngredientId),
    PrepTimeEdited(Decimal),
    LaborRateEdited(Decimal),
    OverheadRateEdited(Decimal),
    /// Raw servings input; floored at 1.
    YieldEdited(i64),
    BatchPriceEdited(Decimal),
    UnitPriceEdited(Decimal),
    MarginEdited(Decimal),
}

/// Result of applying an edit that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// The edit was out of range (a margin of 100% or more, no cost to price
    /// against, or a price too large to represent) and the draft was left as
    /// it was.
    Ignored,
}

/// Which price field currently drives the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    #[default]
    Unit,
    Batch,
    Margin,
}

/// The recipe being created or edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    id: Option<RecipeId>,
    name: String,
    lines: Vec<RecipeIngredientLine>,
    prep_time_minutes: Decimal,
    labor_rate_per_hour: Decimal,
    overhead_rate: Decimal,
    yield_count: u32,
    unit_selling_price: Decimal,
    batch_selling_price: Decimal,
    price_source: PriceSource,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self::new(DEFAULT_OVERHEAD_RATE)
    }
}

impl RecipeDraft {
    /// An empty draft with one serving and no price.
    #[must_use]
    pub fn new(overhead_rate: Decimal) -> Self {
        Self {
            id: None,
            name: String::new(),
            lines: Vec::new(),
            prep_time_minutes: Decimal::ZERO,
            labor_rate_per_hour: Decimal::ZERO,
            overhead_rate,
            yield_count: 1,
            unit_selling_price: Decimal::ZERO,
            batch_selling_price: Decimal::ZERO,
            price_source: PriceSource::Unit,
        }
    }

    /// Open a stored recipe for editing, pricing each ingredient from the
    /// current purchase averages.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::UnknownIngredient`] if the recipe references an
    /// ingredient missing from `catalog`, or
    /// [`DraftError::DuplicateIngredient`] if it lists one twice.
    pub fn from_recipe(
        recipe: &Recipe,
        catalog: &[AggregatedIngredient],
        overhead_rate: Decimal,
    ) -> Result<Self, DraftError> {
        let mut draft = Self::new(overhead_rate);
        draft.id = Some(recipe.id);
        draft.name.clone_from(&recipe.name);
        draft.prep_time_minutes = Decimal::from(recipe.preparation_time);
        draft.yield_count = recipe.servings.max(1);

        for item in &recipe.ingredients {
            let ingredient = catalog
                .iter()
                .find(|c| c.ingredient_id == Some(item.ingredient_id))
                .ok_or(DraftError::UnknownIngredient(item.ingredient_id))?;
            draft.apply(DraftEdit::IngredientAdded(RecipeIngredientLine::from_aggregated(
                item.ingredient_id,
                ingredient,
                item.quantity,
            )))?;
        }

        draft.apply(DraftEdit::UnitPriceEdited(recipe.selling_price))?;
        Ok(draft)
    }

    /// Apply one edit and bring the derived price fields back in line.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError`] when adding an ingredient that is already on
    /// the draft, or editing/removing one that is not. The draft is unchanged
    /// in that case.
    pub fn apply(&mut self, edit: DraftEdit) -> Result<EditOutcome, DraftError> {
        match edit {
            DraftEdit::NameEdited(name) => self.name = name,
            DraftEdit::IngredientAdded(line) => {
                if self.line_index(line.ingredient_id()).is_some() {
                    return Err(DraftError::DuplicateIngredient(line.ingredient_id()));
                }
                self.lines.push(line);
            }
            DraftEdit::IngredientQuantityEdited {
                ingredient_id,
                quantity,
            } => {
                let line = self
                    .lines
                    .iter_mut()
                    .find(|l| l.ingredient_id() == ingredient_id)
                    .ok_or(DraftError::UnknownIngredient(ingredient_id))?;
                line.set_quantity(quantity);
            }
            DraftEdit::IngredientRemoved(ingredient_id) => {
                let index = self
                    .line_index(ingredient_id)
                    .ok_or(DraftError::UnknownIngredient(ingredient_id))?;
                self.lines.remove(index);
            }
            DraftEdit::PrepTimeEdited(minutes) => self.prep_time_minutes = minutes,
            DraftEdit::LaborRateEdited(rate) => self.labor_rate_per_hour = rate,
            DraftEdit::OverheadRateEdited(rate) => self.overhead_rate = rate,
            DraftEdit::YieldEdited(raw) => {
                let yield_count = clamp_yield(raw);
                let Some(batch) = batch_price_from_unit(self.unit_selling_price, yield_count)
                else {
                    return Ok(EditOutcome::Ignored);
                };
                self.yield_count = yield_count;
                self.batch_selling_price = batch;
            }
            DraftEdit::UnitPriceEdited(price) => {
                let Some(batch) = batch_price_from_unit(price, self.yield_count) else {
                    return Ok(EditOutcome::Ignored);
                };
                self.unit_selling_price = price;
                self.batch_selling_price = batch;
                self.price_source = PriceSource::Unit;
            }
            DraftEdit::BatchPriceEdited(price) => {
                self.batch_selling_price = price;
                self.unit_selling_price = unit_price_from_batch(price, self.yield_count);
                self.price_source = PriceSource::Batch;
            }
            DraftEdit::MarginEdited(margin) => {
                let cost = self.per_unit_cost().total_cost_per_unit;
                let Some((price, batch)) = price_from_margin(margin, cost).and_then(|price| {
                    batch_price_from_unit(price, self.yield_count).map(|batch| (price, batch))
                }) else {
                    return Ok(EditOutcome::Ignored);
                };
                self.unit_selling_price = price;
                self.batch_selling_price = batch;
                self.price_source = PriceSource::Margin;
            }
        }
        Ok(EditOutcome::Applied)
    }

    fn line_index(&self, ingredient_id: IngredientId) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| l.ingredient_id() == ingredient_id)
    }

    #[must_use]
    pub const fn id(&self) -> Option<RecipeId> {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn lines(&self) -> &[RecipeIngredientLine] {
        &self.lines
    }

    #[must_use]
    pub const fn yield_count(&self) -> u32 {
        self.yield_count
    }

    #[must_use]
    pub const fn unit_selling_price(&self) -> Decimal {
        self.unit_selling_price
    }

    #[must_use]
    pub const fn batch_selling_price(&self) -> Decimal {
        self.batch_selling_price
    }

    /// The pricing field that was edited most recently.
    #[must_use]
    pub const fn price_source(&self) -> PriceSource {
        self.price_source
    }

    #[must_use]
    pub fn batch_cost(&self) -> BatchCost {
        compute_batch_cost(
            &self.lines,
            self.prep_time_minutes,
            self.labor_rate_per_hour,
            self.overhead_rate,
        )
    }

    #[must_use]
    pub fn per_unit_cost(&self) -> PerUnitCost {
        per_unit(&self.batch_cost(), self.yield_count)
    }

    /// Snapshot of the inputs, for callers that only need the calculator.
    #[must_use]
    pub fn cost_inputs(&self) -> RecipeCostInputs {
        RecipeCostInputs {
            ingredient_lines: self.lines.clone(),
            prep_time_minutes: self.prep_time_minutes,
            labor_rate_per_hour: self.labor_rate_per_hour,
            yield_count: self.yield_count,
            overhead_rate: self.overhead_rate,
            batch_selling_price: self.batch_selling_price,
        }
    }

    /// Every figure shown in the recipe economics panel.
    #[must_use]
    pub fn economics(&self) -> RecipeCostResult {
        self.cost_inputs().evaluate()
    }

    /// Body to send to the backend when the form is submitted.
    ///
    /// Preparation time is stored in whole minutes, rounded to the nearest.
    #[must_use]
    pub fn to_new_recipe(&self) -> NewRecipe {
        let preparation_time = self
            .prep_time_minutes
            .round()
            .max(Decimal::ZERO)
            .to_u32()
            .unwrap_or(u32::MAX);

        NewRecipe {
            name: self.name.clone(),
            selling_price: self.unit_selling_price,
            preparation_time,
            servings: self.yield_count,
            ingredients: self
                .lines
                .iter()
                .map(|l| RecipeIngredient {
                    ingredient_id: l.ingredient_id(),
                    quantity: l.quantity_required(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::Unit;

    fn line(id: i64, name: &str, quantity: Decimal, unit_cost: Decimal) -> RecipeIngredientLine {
        RecipeIngredientLine::new(IngredientId::new(id), name, quantity, Unit::Piece, unit_cost)
    }

    /// Scenario recipe: 488.5 per batch, 10 servings, 48.85 per serving.
    fn scenario_draft() -> RecipeDraft {
        let mut draft = RecipeDraft::default();
        for edit in [
            DraftEdit::NameEdited("Leche flan".to_string()),
            DraftEdit::IngredientAdded(line(1, "Egg", dec!(2), dec!(55))),
            DraftEdit::IngredientAdded(line(2, "Milk", dec!(1), dec!(280))),
            DraftEdit::PrepTimeEdited(dec!(30)),
            DraftEdit::LaborRateEdited(dec!(80)),
            DraftEdit::YieldEdited(10),
        ] {
            draft.apply(edit).unwrap();
        }
        draft
    }

    /// Batch price equals unit price times yield (a batch price that does
    /// not divide evenly leaves a remainder in the 28th digit).
    fn assert_prices_consistent(draft: &RecipeDraft) {
        let implied = draft.unit_selling_price() * Decimal::from(draft.yield_count());
        assert!(
            (draft.batch_selling_price() - implied).abs() < dec!(0.0000000001),
            "batch {} vs unit {} x {}",
            draft.batch_selling_price(),
            draft.unit_selling_price(),
            draft.yield_count()
        );
    }

    #[test]
    fn test_economics_of_scenario() {
        let draft = scenario_draft();
        let result = draft.economics();
        assert_eq!(result.total_cost, dec!(488.5));
        assert_eq!(result.cost_per_unit, dec!(48.85));
        assert_eq!(result.selling_price_per_unit, Decimal::ZERO);
        assert_eq!(result.profit_margin_percent, Decimal::ZERO);
    }

    #[test]
    fn test_margin_edit_sets_both_prices() {
        let mut draft = scenario_draft();
        assert_eq!(draft.apply(DraftEdit::MarginEdited(dec!(50))).unwrap(), EditOutcome::Applied);
        assert_eq!(draft.unit_selling_price(), dec!(97.7));
        assert_eq!(draft.batch_selling_price(), dec!(977));
        assert_eq!(draft.price_source(), PriceSource::Margin);
        assert_eq!(draft.economics().profit_margin_percent, dec!(50));
    }

    #[test]
    fn test_out_of_range_margin_is_ignored() {
        let mut draft = scenario_draft();
        draft.apply(DraftEdit::UnitPriceEdited(dec!(60))).unwrap();
        let before = draft.clone();

        for margin in [dec!(100), dec!(150), dec!(-5)] {
            assert_eq!(draft.apply(DraftEdit::MarginEdited(margin)).unwrap(), EditOutcome::Ignored);
            assert_eq!(draft, before);
        }
    }

    #[test]
    fn test_margin_edit_past_decimal_range_is_ignored() {
        let mut draft = RecipeDraft::default();
        draft
            .apply(DraftEdit::IngredientAdded(line(1, "Saffron", dec!(1), dec!(50))))
            .unwrap();
        draft.apply(DraftEdit::YieldEdited(1000)).unwrap();
        draft.apply(DraftEdit::UnitPriceEdited(dec!(2))).unwrap();
        let before = draft.clone();

        let outcome = draft
            .apply(DraftEdit::MarginEdited(dec!(99.99999999999999999999999999)))
            .unwrap();
        assert_eq!(outcome, EditOutcome::Ignored);
        assert_eq!(draft, before);
    }

    #[test]
    fn test_oversized_unit_price_or_yield_is_ignored() {
        let mut draft = RecipeDraft::default();
        draft.apply(DraftEdit::YieldEdited(3)).unwrap();
        assert_eq!(
            draft.apply(DraftEdit::UnitPriceEdited(Decimal::MAX)).unwrap(),
            EditOutcome::Ignored
        );
        assert_eq!(draft.unit_selling_price(), Decimal::ZERO);

        draft.apply(DraftEdit::YieldEdited(1)).unwrap();
        draft.apply(DraftEdit::UnitPriceEdited(Decimal::MAX)).unwrap();
        assert_eq!(draft.apply(DraftEdit::YieldEdited(2)).unwrap(), EditOutcome::Ignored);
        assert_eq!(draft.yield_count(), 1);
        assert_eq!(draft.batch_selling_price(), Decimal::MAX);
    }

    #[test]
    fn test_margin_edit_without_cost_is_ignored() {
        let mut draft = RecipeDraft::default();
        assert_eq!(
            draft.apply(DraftEdit::MarginEdited(dec!(20))).unwrap(),
            EditOutcome::Ignored
        );
        assert_eq!(draft.unit_selling_price(), Decimal::ZERO);
    }

    #[test]
    fn test_batch_price_edit_updates_unit_price() {
        let mut draft = scenario_draft();
        draft.apply(DraftEdit::BatchPriceEdited(dec!(600))).unwrap();
        assert_eq!(draft.unit_selling_price(), dec!(60));
        assert_eq!(draft.price_source(), PriceSource::Batch);
        assert_prices_consistent(&draft);
    }

    #[test]
    fn test_yield_edit_keeps_unit_price() {
        let mut draft = scenario_draft();
        draft.apply(DraftEdit::UnitPriceEdited(dec!(60))).unwrap();
        draft.apply(DraftEdit::YieldEdited(12)).unwrap();
        assert_eq!(draft.unit_selling_price(), dec!(60));
        assert_eq!(draft.batch_selling_price(), dec!(720));

        draft.apply(DraftEdit::YieldEdited(0)).unwrap();
        assert_eq!(draft.yield_count(), 1);
        assert_prices_consistent(&draft);
    }

    #[test]
    fn test_prices_stay_consistent_across_edit_sequence() {
        let mut draft = scenario_draft();
        let edits = [
            DraftEdit::UnitPriceEdited(dec!(55)),
            DraftEdit::YieldEdited(3),
            DraftEdit::BatchPriceEdited(dec!(100)),
            DraftEdit::MarginEdited(dec!(35)),
            DraftEdit::IngredientQuantityEdited {
                ingredient_id: IngredientId::new(1),
                quantity: dec!(4),
            },
            DraftEdit::YieldEdited(-2),
            DraftEdit::MarginEdited(dec!(100)),
            DraftEdit::IngredientRemoved(IngredientId::new(2)),
        ];
        for edit in edits {
            draft.apply(edit).unwrap();
            assert_prices_consistent(&draft);
        }
    }

    #[test]
    fn test_cost_edit_keeps_price_and_rederives_margin() {
        let mut draft = scenario_draft();
        draft.apply(DraftEdit::MarginEdited(dec!(20))).unwrap();
        let price = draft.unit_selling_price();

        draft
            .apply(DraftEdit::IngredientQuantityEdited {
                ingredient_id: IngredientId::new(1),
                quantity: dec!(3),
            })
            .unwrap();
        assert_eq!(draft.unit_selling_price(), price);
        assert!(draft.economics().profit_margin_percent < dec!(20));
    }

    #[test]
    fn test_duplicate_ingredient_rejected() {
        let mut draft = scenario_draft();
        let err = draft
            .apply(DraftEdit::IngredientAdded(line(1, "Egg", dec!(1), dec!(55))))
            .unwrap_err();
        assert_eq!(err, DraftError::DuplicateIngredient(IngredientId::new(1)));
        assert_eq!(draft.lines().len(), 2);
    }

    #[test]
    fn test_unknown_ingredient_edits_rejected() {
        let mut draft = scenario_draft();
        assert_eq!(
            draft.apply(DraftEdit::IngredientRemoved(IngredientId::new(99))),
            Err(DraftError::UnknownIngredient(IngredientId::new(99)))
        );
        assert!(
            draft
                .apply(DraftEdit::IngredientQuantityEdited {
                    ingredient_id: IngredientId::new(99),
                    quantity: dec!(1),
                })
                .is_err()
        );
    }

    #[test]
    fn test_to_new_recipe() {
        let mut draft = scenario_draft();
        draft.apply(DraftEdit::UnitPriceEdited(dec!(60))).unwrap();
        draft.apply(DraftEdit::PrepTimeEdited(dec!(29.6))).unwrap();

        let recipe = draft.to_new_recipe();
        assert_eq!(recipe.name, "Leche flan");
        assert_eq!(recipe.selling_price, dec!(60));
        assert_eq!(recipe.preparation_time, 30);
        assert_eq!(recipe.servings, 10);
        assert_eq!(recipe.ingredients.len(), 2);
    }

    #[test]
    fn test_from_recipe_prices_from_catalog() {
        let catalog = vec![AggregatedIngredient {
            name: "Rice".to_string(),
            average_unit_price: dec!(55),
            unit: Unit::Kilogram,
            total_quantity_purchased: dec!(10),
            ingredient_id: Some(IngredientId::new(5)),
        }];
        let recipe = Recipe {
            id: RecipeId::new(3),
            name: "Fried rice".to_string(),
            selling_price: dec!(50),
            preparation_time: 15,
            servings: 4,
            ingredients: vec![RecipeIngredient {
                ingredient_id: IngredientId::new(5),
                quantity: dec!(2),
            }],
        };

        let draft = RecipeDraft::from_recipe(&recipe, &catalog, Decimal::ZERO).unwrap();
        assert_eq!(draft.id(), Some(RecipeId::new(3)));
        assert_eq!(draft.batch_selling_price(), dec!(200));
        let result = draft.economics();
        assert_eq!(result.material_cost, dec!(110));
        assert_eq!(result.cost_per_unit, dec!(27.5));
        assert_eq!(result.gross_profit, dec!(22.5));
    }

    #[test]
    fn test_from_recipe_with_missing_ingredient() {
        let recipe = Recipe {
            id: RecipeId::new(3),
            name: "Mystery".to_string(),
            selling_price: dec!(50),
            preparation_time: 0,
            servings: 1,
            ingredients: vec![RecipeIngredient {
                ingredient_id: IngredientId::new(77),
                quantity: dec!(1),
            }],
        };
        assert_eq!(
            RecipeDraft::from_recipe(&recipe, &[], DEFAULT_OVERHEAD_RATE),
            Err(DraftError::UnknownIngredient(IngredientId::new(77)))
        );
    }
}
