//! Business-level costing settings loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PLATE_COST_OVERHEAD_RATE` - Fraction of material cost charged as overhead (default: 0.15)
//! - `PLATE_COST_CURRENCY` - ISO 4217 code used when printing money (default: USD)
//! - `PLATE_COST_MARGIN_LOW` - Margin % below which a recipe is flagged low (default: 10)
//! - `PLATE_COST_MARGIN_FAIR` - Margin % below which a recipe is flagged fair (default: 20)

use plate_cost_core::CurrencyCode;
use plate_cost_core::costing::DEFAULT_OVERHEAD_RATE;
use plate_cost_core::health::MarginThresholds;
use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How recipes are costed and how results are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostingSettings {
    pub overhead_rate: Decimal,
    pub currency: CurrencyCode,
    pub thresholds: MarginThresholds,
}

impl Default for CostingSettings {
    fn default() -> Self {
        Self {
            overhead_rate: DEFAULT_OVERHEAD_RATE,
            currency: CurrencyCode::default(),
            thresholds: MarginThresholds::default(),
        }
    }
}

impl CostingSettings {
    /// Load settings from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, SettingsError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`CostingSettings::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let defaults = Self::default();

        let overhead_rate =
            parse_decimal(&lookup, "PLATE_COST_OVERHEAD_RATE")?.unwrap_or(defaults.overhead_rate);
        if overhead_rate < Decimal::ZERO || overhead_rate >= Decimal::ONE {
            return Err(SettingsError::InvalidEnvVar(
                "PLATE_COST_OVERHEAD_RATE".to_string(),
                format!("must be at least 0 and below 1 (got {overhead_rate})"),
            ));
        }

        let currency = lookup("PLATE_COST_CURRENCY")
            .map(|value| value.parse::<CurrencyCode>())
            .transpose()
            .map_err(|e| SettingsError::InvalidEnvVar("PLATE_COST_CURRENCY".to_string(), e))?
            .unwrap_or(defaults.currency);

        let thresholds = MarginThresholds {
            low: parse_decimal(&lookup, "PLATE_COST_MARGIN_LOW")?
                .unwrap_or(defaults.thresholds.low),
            fair: parse_decimal(&lookup, "PLATE_COST_MARGIN_FAIR")?
                .unwrap_or(defaults.thresholds.fair),
        };
        if thresholds.low > thresholds.fair {
            return Err(SettingsError::InvalidEnvVar(
                "PLATE_COST_MARGIN_LOW".to_string(),
                format!(
                    "must not exceed PLATE_COST_MARGIN_FAIR ({} > {})",
                    thresholds.low, thresholds.fair
                ),
            ));
        }

        Ok(Self {
            overhead_rate,
            currency,
            thresholds,
        })
    }
}

fn parse_decimal(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<Decimal>, SettingsError> {
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<Decimal>()
                .map_err(|e| SettingsError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}
