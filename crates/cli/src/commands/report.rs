//! Profit and loss for a period from a local file.

use std::path::Path;

use plate_cost_core::InventoryPeriodId;
use plate_cost_core::costing::PurchasedItem;
use plate_cost_core::report::{Expense, FinancialReport, Sale};
use serde::Deserialize;

use super::{emit, load_yaml};
use crate::config::CostingSettings;
use crate::error::CliError;
use crate::render;

/// A period's records exported to disk.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFile {
    #[serde(default)]
    pub period: Option<InventoryPeriodId>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub purchases: Vec<PurchasedItem>,
}

impl ReportFile {
    #[must_use]
    pub fn build(&self) -> FinancialReport {
        FinancialReport::build(self.period, &self.sales, &self.expenses, &self.purchases)
    }
}

/// Print the financial report for the records in `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn run(path: &Path, settings: &CostingSettings) -> Result<(), CliError> {
    let file: ReportFile = load_yaml(path).await?;
    emit(&render::report(&file.build(), settings.currency));
    Ok(())
}
