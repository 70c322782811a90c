//! HTTP client for the inventory and recipe backend.

use std::sync::Arc;

use moka::future::Cache;
use plate_cost_core::costing::PurchasedItem;
use plate_cost_core::recipe::{NewRecipe, Recipe};
use plate_cost_core::report::{Expense, Sale};
use plate_cost_core::{InventoryPeriodId, RecipeId};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::Session;

/// Cached purchases are scoped to the user who fetched them.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct PurchasesKey {
    user_email: String,
    period: InventoryPeriodId,
}

/// Client for the backend REST API.
///
/// Cheap to clone; clones share the connection pool and the purchase cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    purchases: Cache<PurchasesKey, Arc<Vec<PurchasedItem>>>,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` if the underlying HTTP client cannot be
    /// built (e.g., TLS backend initialisation fails).
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let purchases = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_url.clone(),
                purchases,
            }),
        })
    }

    // =========================================================================
    // Purchases
    // =========================================================================

    /// Purchases recorded for an inventory period.
    ///
    /// Served from cache when this user fetched the same period recently.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a list of
    /// purchases.
    #[instrument(skip(self, session), fields(user = %session.user_email()))]
    pub async fn list_purchases(
        &self,
        session: &Session,
        period: InventoryPeriodId,
    ) -> Result<Arc<Vec<PurchasedItem>>, ClientError> {
        let key = PurchasesKey {
            user_email: session.user_email().to_string(),
            period,
        };
        if let Some(cached) = self.inner.purchases.get(&key).await {
            debug!(count = cached.len(), "Purchases served from cache");
            return Ok(cached);
        }

        let path = format!("inventory-periods/{period}/purchases");
        let purchases: Vec<PurchasedItem> = self.get(session, &path).await?;
        let purchases = Arc::new(purchases);
        self.inner.purchases.insert(key, Arc::clone(&purchases)).await;

        debug!(count = purchases.len(), "Purchases fetched");
        Ok(purchases)
    }

    /// Drop the cached purchases for one period, e.g. after recording a new
    /// purchase.
    pub async fn invalidate_period(&self, session: &Session, period: InventoryPeriodId) {
        let key = PurchasesKey {
            user_email: session.user_email().to_string(),
            period,
        };
        self.inner.purchases.invalidate(&key).await;
    }

    // =========================================================================
    // Sales & expenses
    // =========================================================================

    /// Sales recorded for an inventory period.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self, session), fields(user = %session.user_email()))]
    pub async fn list_sales(
        &self,
        session: &Session,
        period: InventoryPeriodId,
    ) -> Result<Vec<Sale>, ClientError> {
        self.get(session, &format!("inventory-periods/{period}/sales"))
            .await
    }

    /// Expenses recorded for an inventory period.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self, session), fields(user = %session.user_email()))]
    pub async fn list_expenses(
        &self,
        session: &Session,
        period: InventoryPeriodId,
    ) -> Result<Vec<Expense>, ClientError> {
        self.get(session, &format!("inventory-periods/{period}/expenses"))
            .await
    }

    // =========================================================================
    // Recipes
    // =========================================================================

    /// Fetch a stored recipe.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the recipe does not exist.
    #[instrument(skip(self, session), fields(user = %session.user_email()))]
    pub async fn get_recipe(&self, session: &Session, id: RecipeId) -> Result<Recipe, ClientError> {
        self.get(session, &format!("recipes/{id}")).await
    }

    /// Persist a new recipe and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the recipe.
    #[instrument(skip(self, session, recipe), fields(user = %session.user_email(), name = %recipe.name))]
    pub async fn create_recipe(
        &self,
        session: &Session,
        recipe: &NewRecipe,
    ) -> Result<Recipe, ClientError> {
        self.send_json(session, Method::POST, "recipes", recipe)
            .await
    }

    /// Replace a stored recipe.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the recipe does not exist.
    #[instrument(skip(self, session, recipe), fields(user = %session.user_email()))]
    pub async fn update_recipe(
        &self,
        session: &Session,
        id: RecipeId,
        recipe: &NewRecipe,
    ) -> Result<Recipe, ClientError> {
        self.send_json(session, Method::PUT, &format!("recipes/{id}"), recipe)
            .await
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// End a session and forget everything fetched on its behalf.
    #[allow(clippy::needless_pass_by_value)] // Taking ownership ends the session.
    pub async fn sign_out(&self, session: Session) {
        debug!(user = %session.user_email(), "Signing out");
        self.inner.purchases.invalidate_all();
        self.inner.purchases.run_pending_tasks().await;
    }

    /// Number of cached purchase lists (after pending maintenance).
    pub async fn cached_periods(&self) -> u64 {
        self.inner.purchases.run_pending_tasks().await;
        self.inner.purchases.entry_count()
    }

    // =========================================================================
    // Transport
    // =========================================================================

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.inner.base_url.join(path)?)
    }

    async fn get<T: DeserializeOwned>(&self, session: &Session, path: &str) -> Result<T, ClientError> {
        let request = self
            .inner
            .http
            .get(self.endpoint(path)?)
            .bearer_auth(session.bearer());
        Self::execute(request, path).await
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let request = self
            .inner
            .http
            .request(method, self.endpoint(path)?)
            .bearer_auth(session.bearer())
            .json(body);
        Self::execute(request, path).await
    }

    async fn execute<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED => return Err(ClientError::Unauthorized),
            StatusCode::NOT_FOUND => return Err(ClientError::NotFound(path.to_string())),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(1);
                return Err(ClientError::RateLimited(retry_after));
            }
            _ => {}
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
