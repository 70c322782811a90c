//! Integration tests for Plate Cost.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p plate-cost-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `costing_properties` - Laws the costing engine must obey for any input
//! - `client_api` - Backend client against a mock HTTP server
//!
//! No external services are needed; the backend is mocked with `wiremock`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use plate_cost_client::{ApiClient, ClientConfig, ClientError, Credentials, Session};
use secrecy::SecretString;
use wiremock::MockServer;

/// Token every mocked endpoint expects.
pub const TEST_TOKEN: &str = "k9Qz81mW-test-token";

/// A mock backend plus a client pointed at it.
pub struct TestContext {
    pub server: MockServer,
    pub client: ApiClient,
}

impl TestContext {
    /// Start a mock server and a client using its URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the server URL is rejected or the client cannot be
    /// built.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        let config = ClientConfig::new(&format!("{}/api/v1", server.uri()))?;
        let client = ApiClient::new(&config)?;
        Ok(Self { server, client })
    }

    /// Sign in as `user_email` with [`TEST_TOKEN`].
    ///
    /// # Errors
    ///
    /// Never fails for the fixed token; the `Result` mirrors `Session::sign_in`.
    pub fn sign_in(user_email: &str) -> Result<Session, ClientError> {
        Session::sign_in(Credentials {
            user_email: user_email.to_string(),
            access_token: SecretString::from(TEST_TOKEN.to_string()),
        })
    }
}
