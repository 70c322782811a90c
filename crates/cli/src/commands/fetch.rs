//! Commands that talk to the backend.
//!
//! Each command signs in with the configured credentials, does its work, and
//! signs out again so no cached data outlives the run.

use std::future::Future;
use std::path::Path;

use plate_cost_client::{ApiClient, ClientConfig, Credentials, Session};
use plate_cost_core::costing::{AggregateOptions, aggregate_with};
use plate_cost_core::draft::RecipeDraft;
use plate_cost_core::report::FinancialReport;
use plate_cost_core::{InventoryPeriodId, RecipeId};
use tracing::info;

use super::cost::{RecipeFile, recipe_for_push, report_draft};
use super::{emit, load_yaml};
use crate::config::CostingSettings;
use crate::error::CliError;
use crate::render;

/// Sign in, run `work`, and sign out whether or not it succeeded.
async fn with_session<T, F, Fut>(work: F) -> Result<T, CliError>
where
    F: FnOnce(ApiClient, Session) -> Fut,
    Fut: Future<Output = (Session, Result<T, CliError>)>,
{
    let config = ClientConfig::from_env()?;
    let credentials = Credentials::from_env()?;
    let client = ApiClient::new(&config)?;
    let session = Session::sign_in(credentials)?;
    info!(user = %session.user_email(), api = %config.api_url, "Signed in");

    let (session, result) = work(client.clone(), session).await;
    client.sign_out(session).await;
    result
}

/// Print average ingredient prices for a period.
///
/// # Errors
///
/// Returns an error if configuration is missing or the backend call fails.
pub async fn purchases(
    period: InventoryPeriodId,
    normalize_names: bool,
    settings: &CostingSettings,
) -> Result<(), CliError> {
    with_session(|client, session| async move {
        let result = client.list_purchases(&session, period).await;
        (session, result.map_err(CliError::from))
    })
    .await
    .map(|purchases| {
        info!(%period, purchases = purchases.len(), "Fetched purchases");
        let rolled = aggregate_with(&purchases, AggregateOptions { normalize_names });
        emit(&render::aggregated(&rolled, settings.currency));
    })
}

/// Print the financial report for a period.
///
/// # Errors
///
/// Returns an error if configuration is missing or any backend call fails.
pub async fn report(period: InventoryPeriodId, settings: &CostingSettings) -> Result<(), CliError> {
    let report = with_session(|client, session| async move {
        let result = tokio::try_join!(
            client.list_purchases(&session, period),
            client.list_sales(&session, period),
            client.list_expenses(&session, period),
        )
        .map(|(purchases, sales, expenses)| {
            FinancialReport::build(Some(period), &sales, &expenses, &purchases)
        });
        (session, result.map_err(CliError::from))
    })
    .await?;

    emit(&render::report(&report, settings.currency));
    Ok(())
}

/// Cost a stored recipe against a period's purchase prices.
///
/// # Errors
///
/// Returns an error if the recipe or purchases cannot be fetched, or the
/// recipe uses an ingredient with no purchases in the period.
pub async fn recipe(
    id: RecipeId,
    period: InventoryPeriodId,
    settings: &CostingSettings,
) -> Result<(), CliError> {
    let overhead_rate = settings.overhead_rate;
    let draft = with_session(|client, session| async move {
        let result = async {
            let (recipe, purchases) = tokio::try_join!(
                client.get_recipe(&session, id),
                client.list_purchases(&session, period),
            )?;
            let catalog = aggregate_with(&purchases, AggregateOptions::default());
            Ok::<_, CliError>(RecipeDraft::from_recipe(&recipe, &catalog, overhead_rate)?)
        }
        .await;
        (session, result)
    })
    .await?;

    report_draft(&draft, settings);
    Ok(())
}

/// Save a recipe file to the backend, creating it or replacing `id`.
///
/// Ingredients without a unit cost are priced from `period`'s purchases when
/// one is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the recipe cannot be priced,
/// or the backend rejects it.
pub async fn push_recipe(
    path: &Path,
    id: Option<RecipeId>,
    period: Option<InventoryPeriodId>,
    settings: &CostingSettings,
) -> Result<(), CliError> {
    let file: RecipeFile = load_yaml(path).await?;
    let settings = *settings;

    let saved = with_session(|client, session| async move {
        let result = async {
            let catalog = match period {
                Some(period) => {
                    let purchases = client.list_purchases(&session, period).await?;
                    aggregate_with(&purchases, AggregateOptions::default())
                }
                None => Vec::new(),
            };
            let body = recipe_for_push(&file, &catalog, &settings)?;
            let saved = match id {
                Some(id) => client.update_recipe(&session, id, &body).await?,
                None => client.create_recipe(&session, &body).await?,
            };
            Ok::<_, CliError>(saved)
        }
        .await;
        (session, result)
    })
    .await?;

    info!(id = %saved.id, name = %saved.name, "Recipe saved");
    Ok(())
}
