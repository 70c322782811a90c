//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PLATE_COST_API_URL` - Base URL of the backend (e.g., `https://api.example.com/v1/`)
//! - `PLATE_COST_API_TOKEN` - Access token issued by the auth provider (for [`Credentials`])
//!
//! ## Optional
//! - `PLATE_COST_USER_EMAIL` - Signed-in user, used for logging and cache keys (default: `cli`)
//! - `PLATE_COST_HTTP_TIMEOUT_SECS` - Request timeout (default: 30)
//! - `PLATE_COST_CACHE_TTL_SECS` - Purchase cache time-to-live (default: 300)
//! - `PLATE_COST_CACHE_CAPACITY` - Maximum cached periods (default: 100)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CACHE_CAPACITY: u64 = 100;
const DEFAULT_USER: &str = "cli";

/// Prefixes of placeholder values copied from example files (case-insensitive)
const PLACEHOLDER_PREFIXES: &[&str] = &["your-", "your_", "put-your", "insert-your", "replace-me"];

/// Whole values that are placeholders (case-insensitive)
const PLACEHOLDER_VALUES: &[&str] = &["changeme", "change-me", "placeholder", "todo", "token", "secret"];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Backend connection settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL; always ends with `/` so relative paths join beneath it.
    pub api_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How long fetched purchases stay cached.
    pub cache_ttl: Duration,
    /// Maximum number of cached purchase lists.
    pub cache_capacity: u64,
}

impl ClientConfig {
    /// Build a config with default timeouts for `api_url`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse or is
    /// not http(s).
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_base_url(api_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `PLATE_COST_API_URL` is missing or any value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("PLATE_COST_API_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("PLATE_COST_API_URL".to_string()))?;

        let mut config = Self::new(&api_url)?;
        config.timeout = Duration::from_secs(parse_or_default(
            &lookup,
            "PLATE_COST_HTTP_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?);
        config.cache_ttl = Duration::from_secs(parse_or_default(
            &lookup,
            "PLATE_COST_CACHE_TTL_SECS",
            DEFAULT_CACHE_TTL_SECS,
        )?);
        config.cache_capacity =
            parse_or_default(&lookup, "PLATE_COST_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?;
        Ok(config)
    }
}

/// Who is signing in, and with what token.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct Credentials {
    pub user_email: String,
    pub access_token: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_email", &self.user_email)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Load credentials from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `PLATE_COST_API_TOKEN` is missing or looks like
    /// a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load credentials through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`Credentials::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("PLATE_COST_API_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("PLATE_COST_API_TOKEN".to_string()))?;
        reject_placeholder(&token, "PLATE_COST_API_TOKEN")?;

        Ok(Self {
            user_email: lookup("PLATE_COST_USER_EMAIL").unwrap_or_else(|| DEFAULT_USER.to_string()),
            access_token: SecretString::from(token),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the base URL and make sure it ends with a slash.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("PLATE_COST_API_URL".to_string(), reason);

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Parse an optional numeric variable, falling back to a default.
fn parse_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<u64, ConfigError> {
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Reject tokens copied from an example file.
///
/// Issued tokens are opaque, so only the whole value is checked; a real
/// token may contain any substring.
fn reject_placeholder(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let insecure = |reason: String| ConfigError::InsecureSecret(var_name.to_string(), reason);

    let trimmed = secret.trim();
    if trimmed.is_empty() {
        return Err(insecure("must not be empty".to_string()));
    }

    let lower = trimmed.to_lowercase();
    if let Some(prefix) = PLACEHOLDER_PREFIXES.iter().find(|p| lower.starts_with(**p)) {
        return Err(insecure(format!(
            "appears to be a placeholder (starts with '{prefix}')"
        )));
    }
    if PLACEHOLDER_VALUES.contains(&lower.as_str()) || lower.chars().all(|c| c == 'x') {
        return Err(insecure(format!("appears to be a placeholder ('{trimmed}')")));
    }
    Ok(())
}
