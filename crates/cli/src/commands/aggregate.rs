//! Roll a purchase log up into average unit prices.

use std::path::Path;

use plate_cost_core::costing::{AggregateOptions, PurchasedItem, aggregate_with};
use tracing::info;

use super::{emit, load_yaml};
use crate::config::CostingSettings;
use crate::error::CliError;
use crate::render;

/// Print one line per ingredient with its weighted average price.
///
/// # Errors
///
/// Returns an error if the purchase file cannot be read or parsed.
pub async fn run(
    path: &Path,
    normalize_names: bool,
    settings: &CostingSettings,
) -> Result<(), CliError> {
    let purchases: Vec<PurchasedItem> = load_yaml(path).await?;
    info!(purchases = purchases.len(), "Loaded purchase log");

    let rolled = aggregate_with(&purchases, AggregateOptions { normalize_names });
    emit(&render::aggregated(&rolled, settings.currency));
    Ok(())
}
