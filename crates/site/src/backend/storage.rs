//! File storage facade: public-read object storage behind the backend.
//!
//! Uploads are owner-only; the resulting objects are world-readable at a
//! stable URL derived from the key, so records only need to persist keys.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use secrecy::ExposeSecret;
use tracing::instrument;

use portfolio_core::StorageKey;

use super::{API_KEY_HEADER, AccessToken, BackendError, DataClient};
use crate::config::BackendConfig;

/// Client for the backend's file storage facade.
#[derive(Clone)]
pub struct StorageClient {
    inner: Arc<StorageClientInner>,
}

struct StorageClientInner {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl StorageClient {
    /// Create a new storage client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(StorageClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint.clone(),
                api_key: config.api_key.expose_secret().to_string(),
            }),
        }
    }

    fn object_url(&self, key: &StorageKey) -> String {
        format!("{}/storage/{}", self.inner.endpoint, key.as_str())
    }

    /// Public URL an uploaded object is served from. Safe to embed in
    /// rendered pages; no credentials are required to fetch it.
    #[must_use]
    pub fn public_url(&self, key: &StorageKey) -> String {
        self.object_url(key)
    }

    /// Upload a file under the given key. Owner only. Overwrites any
    /// existing object at the same key.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails or the token is rejected.
    #[instrument(skip(self, token, bytes), fields(key = %key, size = bytes.len()))]
    pub async fn upload(
        &self,
        token: &AccessToken,
        key: &StorageKey,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), BackendError> {
        let response = self
            .inner
            .client
            .put(self.object_url(key))
            .header(API_KEY_HEADER, &self.inner.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", token.expose()))
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        DataClient::expect_success(response).await
    }
}

#[cfg(test)]
mod tests {
    use portfolio_core::StoragePrefix;
    use secrecy::SecretString;

    use super::*;

    fn test_config() -> BackendConfig {
        BackendConfig {
            endpoint: "http://localhost:9999".to_string(),
            api_key: SecretString::from("test-api-key"),
        }
    }

    #[test]
    fn public_url_embeds_the_full_key() {
        let client = StorageClient::new(&test_config());
        let key = StorageKey::derive(StoragePrefix::Blog, 1_700_000_000_000, "cover.png");
        assert_eq!(
            client.public_url(&key),
            "http://localhost:9999/storage/blog/1700000000000-cover.png"
        );
    }
}
