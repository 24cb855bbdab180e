//! Contact message operations for the data API.
//!
//! The authorization shape here is inverted relative to the other entities:
//! anyone may create (the public contact form), but only the owner may list,
//! update, or delete. Visitors drop messages into a box they can never read
//! back.

use tracing::instrument;

use portfolio_core::{ContactId, ContactStatus};

use super::{AccessToken, BackendError, Contact, ContactInput, ContactPatch, DataClient};

const MODEL: &str = "contacts";

impl DataClient {
    /// Create a contact message. Public - the one unauthenticated write in
    /// the system.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self, input), fields(from = %input.email))]
    pub async fn create_contact(&self, input: &ContactInput) -> Result<Contact, BackendError> {
        self.create_record(MODEL, input, None).await
    }

    /// List contact messages, optionally filtered by status. Owner only.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token is rejected.
    #[instrument(skip(self, token))]
    pub async fn list_contacts(
        &self,
        token: &AccessToken,
        status: Option<ContactStatus>,
    ) -> Result<Vec<Contact>, BackendError> {
        let filter = status.map(|s| ("status", s.as_str()));
        self.list_records(MODEL, filter, Some(token)).await
    }

    /// Apply a partial update to a contact message. Owner only.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token is rejected.
    #[instrument(skip(self, token, patch), fields(contact_id = %id))]
    pub async fn update_contact(
        &self,
        token: &AccessToken,
        id: &ContactId,
        patch: &ContactPatch,
    ) -> Result<Contact, BackendError> {
        self.update_record(MODEL, id.as_str(), patch, Some(token))
            .await
    }

    /// Delete a contact message permanently. Owner only.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token is rejected.
    #[instrument(skip(self, token), fields(contact_id = %id))]
    pub async fn delete_contact(
        &self,
        token: &AccessToken,
        id: &ContactId,
    ) -> Result<(), BackendError> {
        self.delete_record(MODEL, id.as_str(), Some(token)).await
    }
}
