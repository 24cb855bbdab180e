//! Identity facade: owner sign-in and sign-out.
//!
//! The backend manages credentials; this client only exchanges them for a
//! bearer token and invalidates that token again at sign-out.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use portfolio_core::Email;

use super::{API_KEY_HEADER, AccessToken, BackendError, DataClient};
use crate::config::BackendConfig;

/// Client for the backend's identity facade.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<IdentityClientInner>,
}

struct IdentityClientInner {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

/// Successful sign-in: the bearer token plus the display name the backend
/// has on file for the account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedIn {
    #[serde(rename = "accessToken")]
    pub token: AccessToken,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Serialize)]
struct SignInBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl IdentityClient {
    /// Create a new identity client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(IdentityClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint.clone(),
                api_key: config.api_key.expose_secret().to_string(),
            }),
        }
    }

    /// Exchange owner credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::PermissionDenied`] on wrong credentials, or
    /// another error if the request itself fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(
        &self,
        email: &Email,
        password: &str,
    ) -> Result<SignedIn, BackendError> {
        let response = self
            .inner
            .client
            .post(format!("{}/identity/sign-in", self.inner.endpoint))
            .header(API_KEY_HEADER, &self.inner.api_key)
            .json(&SignInBody {
                email: email.as_str(),
                password,
            })
            .send()
            .await?;
        DataClient::decode(response).await
    }

    /// Invalidate a bearer token server-side. After this call the token is
    /// rejected by every owner-only operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; an already-invalid token is
    /// not an error.
    #[instrument(skip(self, token))]
    pub async fn sign_out(&self, token: &AccessToken) -> Result<(), BackendError> {
        let response = self
            .inner
            .client
            .post(format!("{}/identity/sign-out", self.inner.endpoint))
            .header(API_KEY_HEADER, &self.inner.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", token.expose()))
            .send()
            .await?;
        DataClient::expect_success(response).await
    }
}
