//! Admin project CRUD handlers.
//!
//! Projects carry a gallery: multiple image files upload concurrently and
//! the record write only starts once every upload has succeeded. Keys of
//! images already on the record travel through a hidden newline-delimited
//! field so an edit without new files keeps the gallery.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use futures::future::try_join_all;
use tracing::instrument;

use portfolio_core::{ProjectId, StoragePrefix, join_lines, split_lines};

use crate::backend::{BackendError, Project, ProjectInput, ProjectPatch};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::CurrentAdmin;
use crate::routes::admin::forms::{FormData, upload_file};
use crate::state::AppState;

/// Project row for the admin list.
#[derive(Clone)]
pub struct ProjectRowView {
    pub id: String,
    pub title: String,
    pub is_featured: bool,
    pub image_count: usize,
    pub created_on: String,
}

impl From<&Project> for ProjectRowView {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            title: project.title.clone(),
            is_featured: project.is_featured,
            image_count: project.images.len(),
            created_on: project.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Admin project list template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/projects/index.html")]
pub struct ProjectsIndexTemplate {
    pub projects: Vec<ProjectRowView>,
}

/// Project form template, shared by the new and edit pages.
#[derive(Template, WebTemplate)]
#[template(path = "admin/projects/form.html")]
pub struct ProjectFormTemplate {
    pub heading: String,
    pub action: String,
    pub error: Option<String>,
    pub draft_title: String,
    pub draft_description: String,
    /// Newline-delimited technology list.
    pub draft_technologies: String,
    pub draft_live_url: String,
    pub draft_github_url: String,
    pub draft_is_featured: bool,
    /// Newline-delimited storage keys of images already on the record.
    pub existing_images: String,
}

impl ProjectFormTemplate {
    fn empty() -> Self {
        Self {
            heading: "New project".to_string(),
            action: "/admin/projects".to_string(),
            error: None,
            draft_title: String::new(),
            draft_description: String::new(),
            draft_technologies: String::new(),
            draft_live_url: String::new(),
            draft_github_url: String::new(),
            draft_is_featured: false,
            existing_images: String::new(),
        }
    }

    fn from_draft(form: &FormData, action: String, heading: &str, error: String) -> Self {
        Self {
            heading: heading.to_string(),
            action,
            error: Some(error),
            draft_title: form.field("title").to_string(),
            draft_description: form.field("description").to_string(),
            draft_technologies: form.field("technologies").to_string(),
            draft_live_url: form.field("live_url").to_string(),
            draft_github_url: form.field("github_url").to_string(),
            draft_is_featured: form.checkbox("is_featured"),
            existing_images: form.field("existing_images").to_string(),
        }
    }
}

/// Generic failure notice for project writes.
const SAVE_FAILED: &str = "Saving the project failed. Your draft is still here - try again.";

/// Display the admin project list, freshly fetched.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> impl IntoResponse {
    let projects = match state.data().list_projects().await {
        Ok(mut projects) => {
            projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            projects.iter().map(ProjectRowView::from).collect()
        }
        Err(error) => {
            tracing::warn!(%error, "Failed to load projects for admin list");
            Vec::new()
        }
    };

    ProjectsIndexTemplate { projects }
}

/// Display the empty new-project form.
pub async fn new_page(RequireAdminAuth(_admin): RequireAdminAuth) -> impl IntoResponse {
    ProjectFormTemplate::empty()
}

/// Display the edit form for an existing project.
#[instrument(skip(state, _admin))]
pub async fn edit_page(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<ProjectId>,
) -> Result<ProjectFormTemplate, AppError> {
    let projects = state.data().list_projects().await?;
    let project = projects
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::NotFound(format!("project {id}")))?;

    let technologies = join_lines(&project.technologies)
        .map_err(|error| AppError::Internal(error.to_string()))?;
    let existing_images = join_lines(&project.images)
        .map_err(|error| AppError::Internal(error.to_string()))?;

    Ok(ProjectFormTemplate {
        heading: "Edit project".to_string(),
        action: format!("/admin/projects/{id}"),
        error: None,
        draft_title: project.title.clone(),
        draft_description: project.description.clone(),
        draft_technologies: technologies,
        draft_live_url: project.live_url.clone().unwrap_or_default(),
        draft_github_url: project.github_url.clone().unwrap_or_default(),
        draft_is_featured: project.is_featured,
        existing_images,
    })
}

/// Create a project from the submitted form.
#[instrument(skip(state, admin, multipart))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = FormData::read(multipart).await?;
    let action = "/admin/projects".to_string();

    if form.field("title").trim().is_empty() || form.field("description").trim().is_empty() {
        return Ok(ProjectFormTemplate::from_draft(
            &form,
            action,
            "New project",
            "Title and description are required.".to_string(),
        )
        .into_response());
    }

    let images = match resolve_images(&state, &admin, &form).await {
        Ok(images) => images,
        Err(error) => {
            tracing::warn!(%error, "Gallery upload failed");
            return Ok(ProjectFormTemplate::from_draft(
                &form,
                action,
                "New project",
                SAVE_FAILED.to_string(),
            )
            .into_response());
        }
    };

    let input = ProjectInput {
        title: form.field("title").trim().to_string(),
        description: form.field("description").to_string(),
        technologies: split_lines(form.field("technologies")),
        live_url: form.optional_field("live_url"),
        github_url: form.optional_field("github_url"),
        images,
        is_featured: form.checkbox("is_featured"),
        created_at: Utc::now(),
    };

    match state.data().create_project(&admin.token, &input).await {
        Ok(_) => {
            state.cache().invalidate_projects().await;
            Ok(Redirect::to("/admin/projects").into_response())
        }
        Err(error) => {
            tracing::warn!(%error, "Failed to create project");
            Ok(ProjectFormTemplate::from_draft(
                &form,
                action,
                "New project",
                SAVE_FAILED.to_string(),
            )
            .into_response())
        }
    }
}

/// Update a project from the submitted form.
#[instrument(skip(state, admin, multipart))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<ProjectId>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = FormData::read(multipart).await?;
    let action = format!("/admin/projects/{id}");

    let images = match resolve_images(&state, &admin, &form).await {
        Ok(images) => images,
        Err(error) => {
            tracing::warn!(%error, "Gallery upload failed");
            return Ok(ProjectFormTemplate::from_draft(
                &form,
                action,
                "Edit project",
                SAVE_FAILED.to_string(),
            )
            .into_response());
        }
    };

    let patch = ProjectPatch {
        title: Some(form.field("title").trim().to_string()),
        description: Some(form.field("description").to_string()),
        technologies: Some(split_lines(form.field("technologies"))),
        live_url: form.optional_field("live_url"),
        github_url: form.optional_field("github_url"),
        images: Some(images),
        is_featured: Some(form.checkbox("is_featured")),
    };

    match state.data().update_project(&admin.token, &id, &patch).await {
        Ok(_) => {
            state.cache().invalidate_projects().await;
            Ok(Redirect::to("/admin/projects").into_response())
        }
        Err(error) => {
            tracing::warn!(%error, "Failed to update project");
            Ok(ProjectFormTemplate::from_draft(
                &form,
                action,
                "Edit project",
                SAVE_FAILED.to_string(),
            )
            .into_response())
        }
    }
}

/// Delete a project and return to the list.
#[instrument(skip(state, admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<ProjectId>,
) -> impl IntoResponse {
    if let Err(error) = state.data().delete_project(&admin.token, &id).await {
        tracing::warn!(%error, "Failed to delete project");
    } else {
        state.cache().invalidate_projects().await;
    }
    Redirect::to("/admin/projects")
}

/// Flip a project's featured flag and return to the list.
#[instrument(skip(state, admin))]
pub async fn toggle_featured(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<ProjectId>,
) -> Result<impl IntoResponse, AppError> {
    let projects = state.data().list_projects().await?;
    let project = projects
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::NotFound(format!("project {id}")))?;

    let patch = ProjectPatch {
        is_featured: Some(!project.is_featured),
        ..Default::default()
    };

    if let Err(error) = state.data().update_project(&admin.token, &id, &patch).await {
        tracing::warn!(%error, "Failed to toggle featured flag");
    } else {
        state.cache().invalidate_projects().await;
    }

    Ok(Redirect::to("/admin/projects"))
}

/// Upload every newly-selected gallery image concurrently, then append
/// their keys to the ones the form carried through. Any upload failure
/// aborts the whole write, leaving the record untouched.
async fn resolve_images(
    state: &AppState,
    admin: &CurrentAdmin,
    form: &FormData,
) -> Result<Vec<String>, BackendError> {
    let mut images = split_lines(form.field("existing_images"));

    let uploads = form.files("images").iter().map(|file| {
        upload_file(state.storage(), &admin.token, StoragePrefix::Projects, file)
    });
    let new_keys = try_join_all(uploads).await?;

    images.extend(new_keys.into_iter().map(portfolio_core::StorageKey::into_inner));
    Ok(images)
}
