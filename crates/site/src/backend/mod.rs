//! Managed backend clients: data, file storage, and identity facades.
//!
//! # Architecture
//!
//! - The backend is the source of truth - NO local persistence, direct API
//!   calls over JSON/HTTP via `reqwest`
//! - One cheap-clone client per facade, constructed once from config and
//!   injected through `AppState` (never a module-level global)
//! - Authorization follows the backend's declarative policy and is mirrored
//!   in the method signatures: operations only the owner may perform take an
//!   [`AccessToken`]; public operations take none. The public API key header
//!   is sent on every request.
//!
//! # Wire protocol
//!
//! - Data: `GET/POST /data/{model}`, `PATCH/DELETE /data/{model}/{id}`;
//!   list responses are `{"items": [...]}`; list filters are equality
//!   predicates passed as query parameters
//! - Storage: `PUT /storage/{key}` with the raw bytes
//! - Identity: `POST /identity/sign-in`, `POST /identity/sign-out`

mod contacts;
mod identity;
mod posts;
mod projects;
mod services;
mod storage;
pub mod types;

pub use identity::{IdentityClient, SignedIn};
pub use storage::StorageClient;
pub use types::*;

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::config::BackendConfig;

/// Header carrying the public API key on every backend request.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Errors that can occur when talking to the managed backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// HTTP request failed (transport-level).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The caller is not allowed to perform the operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Record not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Bearer token for owner-only operations, obtained from the identity
/// facade at sign-in. Stored in the admin session; `Debug` is redacted.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Expose the raw token for the Authorization header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Client for the managed backend's data API.
///
/// Provides type-safe list/create/update/delete per entity. The typed
/// operations are implemented on this client in the per-entity modules
/// (projects, services, contacts, posts).
#[derive(Clone)]
pub struct DataClient {
    inner: Arc<DataClientInner>,
}

struct DataClientInner {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

/// Error body the backend returns on failures: `{"message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl DataClient {
    /// Create a new data API client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(DataClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint.clone(),
                api_key: config.api_key.expose_secret().to_string(),
            }),
        }
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/data/{model}", self.inner.endpoint)
    }

    fn record_url(&self, model: &str, id: &str) -> String {
        format!("{}/data/{model}/{id}", self.inner.endpoint)
    }

    fn apply_headers(
        &self,
        request: reqwest::RequestBuilder,
        token: Option<&AccessToken>,
    ) -> reqwest::RequestBuilder {
        let request = request.header(API_KEY_HEADER, &self.inner.api_key);
        match token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token.expose())),
            None => request,
        }
    }

    /// Check the response status and decode the JSON body.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            return Ok(serde_json::from_str(&text)?);
        }

        Err(Self::status_error(status, response).await)
    }

    /// Check the response status, discarding any body.
    async fn expect_success(response: reqwest::Response) -> Result<(), BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(Self::status_error(status, response).await)
    }

    async fn status_error(status: reqwest::StatusCode, response: reqwest::Response) -> BackendError {
        let message = response
            .text()
            .await
            .ok()
            .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.to_string());

        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                BackendError::PermissionDenied(message)
            }
            reqwest::StatusCode::NOT_FOUND => BackendError::NotFound(message),
            _ => BackendError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// List all records of a model, optionally filtered by one equality
    /// predicate passed as a query parameter.
    pub(super) async fn list_records<T: DeserializeOwned>(
        &self,
        model: &str,
        filter: Option<(&str, &str)>,
        token: Option<&AccessToken>,
    ) -> Result<Vec<T>, BackendError> {
        let mut request = self.inner.client.get(self.model_url(model));
        if let Some((field, value)) = filter {
            request = request.query(&[(field, value)]);
        }
        let response = self.apply_headers(request, token).send().await?;
        let list: ListResponse<T> = Self::decode(response).await?;
        Ok(list.items)
    }

    /// Create a record; the backend assigns the id and timestamps.
    pub(super) async fn create_record<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        model: &str,
        body: &B,
        token: Option<&AccessToken>,
    ) -> Result<T, BackendError> {
        let request = self.inner.client.post(self.model_url(model)).json(body);
        let response = self.apply_headers(request, token).send().await?;
        Self::decode(response).await
    }

    /// Apply a partial update; absent fields are left untouched and the
    /// backend refreshes `updatedAt`.
    pub(super) async fn update_record<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        model: &str,
        id: &str,
        body: &B,
        token: Option<&AccessToken>,
    ) -> Result<T, BackendError> {
        let request = self
            .inner
            .client
            .patch(self.record_url(model, id))
            .json(body);
        let response = self.apply_headers(request, token).send().await?;
        Self::decode(response).await
    }

    /// Delete a record permanently. No soft delete exists.
    pub(super) async fn delete_record(
        &self,
        model: &str,
        id: &str,
        token: Option<&AccessToken>,
    ) -> Result<(), BackendError> {
        let request = self.inner.client.delete(self.record_url(model, id));
        let response = self.apply_headers(request, token).send().await?;
        Self::expect_success(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_debug_is_redacted() {
        let token = AccessToken::new("sekrit-token-value");
        let debug = format!("{token:?}");
        assert!(!debug.contains("sekrit"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn access_token_serde_is_transparent() {
        let token = AccessToken::new("abc");
        let json = serde_json::to_string(&token).expect("serialize");
        assert_eq!(json, "\"abc\"");
    }
}
