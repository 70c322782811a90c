//! CLI command implementations.

pub mod aggregate;
pub mod cost;
pub mod fetch;
pub mod price;
pub mod report;

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::CliError;

/// Read and parse a YAML (or JSON) input file.
pub async fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let display = path.display().to_string();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Io {
            path: display.clone(),
            source,
        })?;
    serde_yaml::from_str(&raw).map_err(|source| CliError::Parse {
        path: display,
        source,
    })
}

/// Write rendered lines to the log.
pub fn emit(lines: &[String]) {
    for line in lines {
        info!("{line}");
    }
}
