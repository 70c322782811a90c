//! Signed-in identity passed explicitly to every backend call.
//!
//! A [`Session`] exists only between sign-in and sign-out: it is created by
//! [`Session::sign_in`] and consumed by [`crate::ApiClient::sign_out`].

use secrecy::{ExposeSecret, SecretString};

use crate::config::Credentials;
use crate::error::ClientError;

/// An authenticated user and their bearer token.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct Session {
    user_email: String,
    access_token: SecretString,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_email", &self.user_email)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl Session {
    /// Start a session from credentials issued by the auth provider.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::EmptyToken` if the token is blank.
    pub fn sign_in(credentials: Credentials) -> Result<Self, ClientError> {
        if credentials.access_token.expose_secret().trim().is_empty() {
            return Err(ClientError::EmptyToken);
        }
        Ok(Self {
            user_email: credentials.user_email,
            access_token: credentials.access_token,
        })
    }

    /// Email of the signed-in user.
    #[must_use]
    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub(crate) fn bearer(&self) -> &str {
        self.access_token.expose_secret()
    }
}
