//! Blog post CRUD operations for the data API.

use tracing::instrument;

use portfolio_core::BlogPostId;

use super::{AccessToken, BackendError, BlogPost, BlogPostInput, BlogPostPatch, DataClient};

const MODEL: &str = "blog-posts";

impl DataClient {
    /// List all blog posts, drafts included. Publicly readable; the public
    /// blog pages filter to published posts.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn list_posts(&self) -> Result<Vec<BlogPost>, BackendError> {
        self.list_records(MODEL, None, None).await
    }

    /// Create a blog post. Owner only.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token is rejected.
    #[instrument(skip(self, token, input), fields(title = %input.title))]
    pub async fn create_post(
        &self,
        token: &AccessToken,
        input: &BlogPostInput,
    ) -> Result<BlogPost, BackendError> {
        self.create_record(MODEL, input, Some(token)).await
    }

    /// Apply a partial update to a blog post. Owner only.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token is rejected.
    #[instrument(skip(self, token, patch), fields(post_id = %id))]
    pub async fn update_post(
        &self,
        token: &AccessToken,
        id: &BlogPostId,
        patch: &BlogPostPatch,
    ) -> Result<BlogPost, BackendError> {
        self.update_record(MODEL, id.as_str(), patch, Some(token))
            .await
    }

    /// Delete a blog post permanently. Owner only.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token is rejected.
    #[instrument(skip(self, token), fields(post_id = %id))]
    pub async fn delete_post(
        &self,
        token: &AccessToken,
        id: &BlogPostId,
    ) -> Result<(), BackendError> {
        self.delete_record(MODEL, id.as_str(), Some(token)).await
    }
}
