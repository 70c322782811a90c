//! Cost a recipe described in a local file.

use std::path::Path;

use plate_cost_core::costing::{AggregatedIngredient, PurchasedItem, RecipeIngredientLine, aggregate};
use plate_cost_core::draft::{DraftEdit, EditOutcome, RecipeDraft};
use plate_cost_core::health::MarginHealth;
use plate_cost_core::recipe::NewRecipe;
use plate_cost_core::{IngredientId, Unit};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use super::{emit, load_yaml};
use crate::config::CostingSettings;
use crate::error::CliError;
use crate::render;

const fn one() -> i64 {
    1
}

/// A recipe as written by hand.
///
/// Pricing is optional. When several pricing fields are present they are
/// applied in the order batch price, price per serving, target margin, and
/// the last one wins.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFile {
    pub name: String,
    #[serde(default)]
    pub prep_time_minutes: Decimal,
    #[serde(default)]
    pub labor_rate_per_hour: Decimal,
    #[serde(default = "one", rename = "yield")]
    pub yield_count: i64,
    #[serde(default)]
    pub overhead_rate: Option<Decimal>,
    #[serde(default)]
    pub batch_selling_price: Option<Decimal>,
    #[serde(default)]
    pub selling_price: Option<Decimal>,
    #[serde(default)]
    pub target_margin: Option<Decimal>,
    #[serde(default)]
    pub ingredients: Vec<IngredientEntry>,
}

/// One ingredient line. `unitCost` and `unit` may be left out when the
/// ingredient appears in the purchase history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientEntry {
    #[serde(default)]
    pub id: Option<IngredientId>,
    pub name: String,
    pub quantity: Decimal,
    #[serde(default)]
    pub unit: Option<Unit>,
    #[serde(default)]
    pub unit_cost: Option<Decimal>,
}

/// Replay a recipe file into a draft, pricing ingredients from `catalog`
/// where the file gives no unit cost.
///
/// Ingredients with no ID of their own or from the catalog are numbered by
/// position, which is only meaningful locally; see [`recipe_for_push`].
///
/// # Errors
///
/// Returns `CliError::MissingCost` when an ingredient has no cost at all, and
/// `CliError::Draft` when an ingredient is listed twice.
pub fn build_draft(
    file: &RecipeFile,
    catalog: &[AggregatedIngredient],
    settings: &CostingSettings,
) -> Result<RecipeDraft, CliError> {
    let mut draft = RecipeDraft::new(file.overhead_rate.unwrap_or(settings.overhead_rate));
    let mut edits = vec![
        DraftEdit::NameEdited(file.name.clone()),
        DraftEdit::PrepTimeEdited(file.prep_time_minutes),
        DraftEdit::LaborRateEdited(file.labor_rate_per_hour),
        DraftEdit::YieldEdited(file.yield_count),
    ];

    for (position, entry) in (1_i64..).zip(&file.ingredients) {
        let known = catalog.iter().find(|c| c.name == entry.name);
        let unit_cost = entry
            .unit_cost
            .or_else(|| known.map(|c| c.average_unit_price))
            .ok_or_else(|| CliError::MissingCost(entry.name.clone()))?;
        let unit = entry.unit.or_else(|| known.map(|c| c.unit)).unwrap_or_default();
        let id = entry
            .id
            .or_else(|| known.and_then(|c| c.ingredient_id))
            .unwrap_or_else(|| IngredientId::new(position));

        edits.push(DraftEdit::IngredientAdded(RecipeIngredientLine::new(
            id,
            entry.name.clone(),
            entry.quantity,
            unit,
            unit_cost,
        )));
    }

    // Prices go last so a target margin is solved against the full cost.
    if let Some(price) = file.batch_selling_price {
        edits.push(DraftEdit::BatchPriceEdited(price));
    }
    if let Some(price) = file.selling_price {
        edits.push(DraftEdit::UnitPriceEdited(price));
    }
    for edit in edits {
        draft.apply(edit)?;
    }

    if let Some(margin) = file.target_margin
        && draft.apply(DraftEdit::MarginEdited(margin))? == EditOutcome::Ignored
    {
        warn!(%margin, "Target margin cannot be reached, keeping the current price");
    }

    Ok(draft)
}

/// Build the body that saves a recipe file to the backend.
///
/// # Errors
///
/// Returns `CliError::MissingIngredientId` when an ingredient has neither an
/// `id` in the file nor a backend ID from a matching purchase, plus anything
/// [`build_draft`] returns.
pub fn recipe_for_push(
    file: &RecipeFile,
    catalog: &[AggregatedIngredient],
    settings: &CostingSettings,
) -> Result<NewRecipe, CliError> {
    for entry in &file.ingredients {
        let stored_id = entry.id.or_else(|| {
            catalog
                .iter()
                .find(|c| c.name == entry.name)
                .and_then(|c| c.ingredient_id)
        });
        if stored_id.is_none() {
            return Err(CliError::MissingIngredientId(entry.name.clone()));
        }
    }
    Ok(build_draft(file, catalog, settings)?.to_new_recipe())
}

/// Load a recipe file and print its economics.
///
/// # Errors
///
/// Returns an error if an input file cannot be read or the recipe cannot be
/// priced.
pub async fn run(
    recipe_path: &Path,
    purchases_path: Option<&Path>,
    settings: &CostingSettings,
) -> Result<(), CliError> {
    let file: RecipeFile = load_yaml(recipe_path).await?;
    let catalog = match purchases_path {
        Some(path) => {
            let purchases: Vec<PurchasedItem> = load_yaml(path).await?;
            aggregate(&purchases)
        }
        None => Vec::new(),
    };

    let draft = build_draft(&file, &catalog, settings)?;
    report_draft(&draft, settings);
    Ok(())
}

/// Print the economics panel for a draft, with a warning on weak margins.
pub fn report_draft(draft: &RecipeDraft, settings: &CostingSettings) {
    let result = draft.economics();
    let health = MarginHealth::of(&result, settings.thresholds);

    info!(ingredients = draft.lines().len(), "Recipe costed");
    emit(&render::economics(
        draft.name(),
        &result,
        draft.yield_count(),
        health,
        settings.currency,
    ));
    if health.is_warning() {
        warn!(%health, "Review pricing for {}", draft.name());
    }
}
