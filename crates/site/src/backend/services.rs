//! Service CRUD operations for the data API.

use tracing::instrument;

use portfolio_core::ServiceId;

use super::{AccessToken, BackendError, DataClient, Service, ServiceInput, ServicePatch};

const MODEL: &str = "services";

impl DataClient {
    /// List all services. Publicly readable; callers sort by `orderIndex`
    /// for display.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn list_services(&self) -> Result<Vec<Service>, BackendError> {
        self.list_records(MODEL, None, None).await
    }

    /// Create a service. Owner only.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token is rejected.
    #[instrument(skip(self, token, input), fields(title = %input.title))]
    pub async fn create_service(
        &self,
        token: &AccessToken,
        input: &ServiceInput,
    ) -> Result<Service, BackendError> {
        self.create_record(MODEL, input, Some(token)).await
    }

    /// Apply a partial update to a service. Owner only.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token is rejected.
    #[instrument(skip(self, token, patch), fields(service_id = %id))]
    pub async fn update_service(
        &self,
        token: &AccessToken,
        id: &ServiceId,
        patch: &ServicePatch,
    ) -> Result<Service, BackendError> {
        self.update_record(MODEL, id.as_str(), patch, Some(token))
            .await
    }

    /// Delete a service permanently. Owner only.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token is rejected.
    #[instrument(skip(self, token), fields(service_id = %id))]
    pub async fn delete_service(
        &self,
        token: &AccessToken,
        id: &ServiceId,
    ) -> Result<(), BackendError> {
        self.delete_record(MODEL, id.as_str(), Some(token)).await
    }
}
