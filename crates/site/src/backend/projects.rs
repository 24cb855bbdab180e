//! Project CRUD operations for the data API.

use tracing::instrument;

use portfolio_core::ProjectId;

use super::{AccessToken, BackendError, DataClient, Project, ProjectInput, ProjectPatch};

const MODEL: &str = "projects";

impl DataClient {
    /// List all projects. Publicly readable.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Result<Vec<Project>, BackendError> {
        self.list_records(MODEL, None, None).await
    }

    /// Create a project. Owner only.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token is rejected.
    #[instrument(skip(self, token, input), fields(title = %input.title))]
    pub async fn create_project(
        &self,
        token: &AccessToken,
        input: &ProjectInput,
    ) -> Result<Project, BackendError> {
        self.create_record(MODEL, input, Some(token)).await
    }

    /// Apply a partial update to a project. Owner only.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token is rejected.
    #[instrument(skip(self, token, patch), fields(project_id = %id))]
    pub async fn update_project(
        &self,
        token: &AccessToken,
        id: &ProjectId,
        patch: &ProjectPatch,
    ) -> Result<Project, BackendError> {
        self.update_record(MODEL, id.as_str(), patch, Some(token))
            .await
    }

    /// Delete a project permanently. Owner only.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token is rejected.
    #[instrument(skip(self, token), fields(project_id = %id))]
    pub async fn delete_project(
        &self,
        token: &AccessToken,
        id: &ProjectId,
    ) -> Result<(), BackendError> {
        self.delete_record(MODEL, id.as_str(), Some(token)).await
    }
}
