//! Plate Cost Client - typed access to the inventory and recipe backend.
//!
//! # Architecture
//!
//! - `reqwest` for HTTP, JSON bodies in camelCase
//! - The backend is the source of truth; nothing is persisted locally
//! - Purchases per inventory period are cached in memory via `moka`
//! - Identity is an explicit [`Session`] value handed to every call; there is
//!   no global token. Signing out clears the cache.
//!
//! # Example
//!
//! ```rust,ignore
//! use plate_cost_client::{ApiClient, ClientConfig, Credentials, Session};
//!
//! let client = ApiClient::new(&ClientConfig::from_env()?)?;
//! let session = Session::sign_in(Credentials::from_env()?)?;
//!
//! let purchases = client.list_purchases(&session, period).await?;
//! let rolled_up = plate_cost_core::costing::aggregate(&purchases);
//!
//! client.sign_out(session).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod client;
pub mod config;
mod error;
mod session;

pub use client::ApiClient;
pub use config::{ClientConfig, ConfigError, Credentials};
pub use error::ClientError;
pub use session::Session;
