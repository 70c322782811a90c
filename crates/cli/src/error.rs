//! Unified error handling for the CLI.

use plate_cost_client::{ClientError, ConfigError};
use plate_cost_core::draft::DraftError;
use thiserror::Error;

use crate::config::SettingsError;

/// Anything that can make a command fail.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Input file is not valid YAML for the expected shape.
    #[error("Cannot parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    /// Costing settings are invalid.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Backend configuration is missing or invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Backend call failed.
    #[error("Backend error: {0}")]
    Client(#[from] ClientError),

    /// Recipe could not be assembled.
    #[error("Recipe error: {0}")]
    Draft(#[from] DraftError),

    /// An ingredient has no unit cost and no purchase history to price it.
    #[error("No unit cost for ingredient '{0}' (add unitCost or pass --purchases)")]
    MissingCost(String),

    /// An ingredient to be saved has no backend ID and no purchase carrying one.
    #[error("No ingredient ID for '{0}' (add id or pass --period with a purchase of it)")]
    MissingIngredientId(String),

    /// Command-line arguments were inconsistent.
    #[error("Bad arguments: {0}")]
    BadArguments(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        let err = CliError::MissingCost("Saffron".to_string());
        assert_eq!(
            err.to_string(),
            "No unit cost for ingredient 'Saffron' (add unitCost or pass --purchases)"
        );

        let err = CliError::BadArguments("pass --margin or --price".to_string());
        assert_eq!(err.to_string(), "Bad arguments: pass --margin or --price");
    }
}
