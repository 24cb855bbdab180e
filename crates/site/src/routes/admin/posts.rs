//! Admin blog post CRUD handlers.
//!
//! Lifecycle per mutation: read the multipart body, upload any new
//! featured image first, then write the record, invalidate the public
//! cache, and redirect back to the list. A failed write re-renders the
//! form with the submitted draft and a generic notice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use tracing::instrument;

use portfolio_core::{BlogPostId, PostStatus, StoragePrefix};

use crate::backend::{BlogPost, BlogPostInput, BlogPostPatch};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::routes::admin::forms::{FormData, upload_file};
use crate::state::AppState;

/// Post row for the admin list.
#[derive(Clone)]
pub struct PostRowView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub status: String,
    pub created_on: String,
}

impl From<&BlogPost> for PostRowView {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            category: post.category.clone(),
            status: post.status.as_str().to_string(),
            created_on: post.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Admin post list template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/posts/index.html")]
pub struct PostsIndexTemplate {
    pub posts: Vec<PostRowView>,
}

/// Post form template, shared by the new and edit pages.
#[derive(Template, WebTemplate)]
#[template(path = "admin/posts/form.html")]
pub struct PostFormTemplate {
    pub heading: String,
    /// Where the form posts to.
    pub action: String,
    pub error: Option<String>,
    pub draft_title: String,
    pub draft_content: String,
    pub draft_category: String,
    pub draft_status: String,
    /// Storage key of the current featured image, carried in a hidden
    /// field so "no new file" keeps it.
    pub existing_image: Option<String>,
}

impl PostFormTemplate {
    fn empty() -> Self {
        Self {
            heading: "New post".to_string(),
            action: "/admin/posts".to_string(),
            error: None,
            draft_title: String::new(),
            draft_content: String::new(),
            draft_category: String::new(),
            draft_status: PostStatus::Draft.as_str().to_string(),
            existing_image: None,
        }
    }

    fn for_record(post: &BlogPost) -> Self {
        Self {
            heading: "Edit post".to_string(),
            action: format!("/admin/posts/{}", post.id),
            error: None,
            draft_title: post.title.clone(),
            draft_content: post.content.clone(),
            draft_category: post.category.clone(),
            draft_status: post.status.as_str().to_string(),
            existing_image: post.featured_image.clone(),
        }
    }

    fn from_draft(form: &FormData, action: String, heading: &str, error: String) -> Self {
        Self {
            heading: heading.to_string(),
            action,
            error: Some(error),
            draft_title: form.field("title").to_string(),
            draft_content: form.field("content").to_string(),
            draft_category: form.field("category").to_string(),
            draft_status: form.field("status").to_string(),
            existing_image: form.optional_field("existing_featured_image"),
        }
    }
}

/// Generic failure notice for post writes.
const SAVE_FAILED: &str = "Saving the post failed. Your draft is still here - try again.";

/// Display the admin post list, freshly fetched.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> impl IntoResponse {
    let posts = match state.data().list_posts().await {
        Ok(mut posts) => {
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            posts.iter().map(PostRowView::from).collect()
        }
        Err(error) => {
            tracing::warn!(%error, "Failed to load posts for admin list");
            Vec::new()
        }
    };

    PostsIndexTemplate { posts }
}

/// Display the empty new-post form.
pub async fn new_page(RequireAdminAuth(_admin): RequireAdminAuth) -> impl IntoResponse {
    PostFormTemplate::empty()
}

/// Display the edit form for an existing post.
#[instrument(skip(state, _admin))]
pub async fn edit_page(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<BlogPostId>,
) -> Result<PostFormTemplate, AppError> {
    let posts = state.data().list_posts().await?;
    let post = posts
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::NotFound(format!("blog post {id}")))?;

    Ok(PostFormTemplate::for_record(post))
}

/// Create a blog post from the submitted form.
#[instrument(skip(state, admin, multipart))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = FormData::read(multipart).await?;
    let action = "/admin/posts".to_string();

    if form.field("title").trim().is_empty() || form.field("content").trim().is_empty() {
        return Ok(PostFormTemplate::from_draft(
            &form,
            action,
            "New post",
            "Title and content are required.".to_string(),
        )
        .into_response());
    }

    let featured_image = match resolve_image(&state, &admin, &form).await {
        Ok(key) => key,
        Err(error) => {
            tracing::warn!(%error, "Featured image upload failed");
            return Ok(PostFormTemplate::from_draft(
                &form,
                action,
                "New post",
                SAVE_FAILED.to_string(),
            )
            .into_response());
        }
    };

    let input = BlogPostInput {
        title: form.field("title").trim().to_string(),
        content: form.field("content").to_string(),
        category: form.field("category").trim().to_string(),
        status: PostStatus::parse_or_draft(form.field("status")),
        featured_image,
        created_at: Utc::now(),
    };

    match state.data().create_post(&admin.token, &input).await {
        Ok(_) => {
            state.cache().invalidate_posts().await;
            Ok(Redirect::to("/admin/posts").into_response())
        }
        Err(error) => {
            tracing::warn!(%error, "Failed to create post");
            Ok(
                PostFormTemplate::from_draft(&form, action, "New post", SAVE_FAILED.to_string())
                    .into_response(),
            )
        }
    }
}

/// Update a blog post from the submitted form.
#[instrument(skip(state, admin, multipart))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<BlogPostId>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = FormData::read(multipart).await?;
    let action = format!("/admin/posts/{id}");

    let featured_image = match resolve_image(&state, &admin, &form).await {
        Ok(key) => key,
        Err(error) => {
            tracing::warn!(%error, "Featured image upload failed");
            return Ok(PostFormTemplate::from_draft(
                &form,
                action,
                "Edit post",
                SAVE_FAILED.to_string(),
            )
            .into_response());
        }
    };

    let patch = BlogPostPatch {
        title: Some(form.field("title").trim().to_string()),
        content: Some(form.field("content").to_string()),
        category: Some(form.field("category").trim().to_string()),
        status: Some(PostStatus::parse_or_draft(form.field("status"))),
        featured_image,
    };

    match state.data().update_post(&admin.token, &id, &patch).await {
        Ok(_) => {
            state.cache().invalidate_posts().await;
            Ok(Redirect::to("/admin/posts").into_response())
        }
        Err(error) => {
            tracing::warn!(%error, "Failed to update post");
            Ok(
                PostFormTemplate::from_draft(&form, action, "Edit post", SAVE_FAILED.to_string())
                    .into_response(),
            )
        }
    }
}

/// Delete a blog post and return to the list.
#[instrument(skip(state, admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<BlogPostId>,
) -> impl IntoResponse {
    if let Err(error) = state.data().delete_post(&admin.token, &id).await {
        tracing::warn!(%error, "Failed to delete post");
    } else {
        state.cache().invalidate_posts().await;
    }
    Redirect::to("/admin/posts")
}

/// Upload a newly-selected featured image, or fall back to the key the
/// form carried through its hidden field.
async fn resolve_image(
    state: &AppState,
    admin: &crate::models::CurrentAdmin,
    form: &FormData,
) -> Result<Option<String>, crate::backend::BackendError> {
    match form.file("featured_image") {
        Some(file) => {
            let key =
                upload_file(state.storage(), &admin.token, StoragePrefix::Blog, file).await?;
            Ok(Some(key.into_inner()))
        }
        None => Ok(form.optional_field("existing_featured_image")),
    }
}
