//! Admin service CRUD and reordering handlers.
//!
//! Services carry a dense display order (`orderIndex` 0..N-1). Moving a
//! service swaps it with its immediate neighbor and then rewrites every
//! record's index to its position, as concurrent updates joined before the
//! redirect. List-valued fields (features, technologies) edit as
//! newline-delimited text.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use futures::future::try_join_all;
use serde::Deserialize;
use tracing::instrument;

use portfolio_core::{
    Direction, ServiceId, StoragePrefix, join_lines, move_item, split_lines,
};

use crate::backend::{Service, ServiceInput, ServicePatch};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::CurrentAdmin;
use crate::routes::admin::forms::{FormData, upload_file};
use crate::state::AppState;

/// Service row for the admin list.
#[derive(Clone)]
pub struct ServiceRowView {
    pub id: String,
    pub title: String,
    pub order_index: i32,
    pub is_active: bool,
    pub is_first: bool,
    pub is_last: bool,
}

/// Admin service list template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/services/index.html")]
pub struct ServicesIndexTemplate {
    pub services: Vec<ServiceRowView>,
}

/// Service form template, shared by the new and edit pages.
#[derive(Template, WebTemplate)]
#[template(path = "admin/services/form.html")]
pub struct ServiceFormTemplate {
    pub heading: String,
    pub action: String,
    pub error: Option<String>,
    pub draft_title: String,
    pub draft_description: String,
    /// Newline-delimited feature list.
    pub draft_features: String,
    /// Newline-delimited technology list.
    pub draft_technologies: String,
    pub draft_order_index: i32,
    pub draft_is_active: bool,
    pub existing_icon: Option<String>,
}

impl ServiceFormTemplate {
    fn empty(order_index: i32) -> Self {
        Self {
            heading: "New service".to_string(),
            action: "/admin/services".to_string(),
            error: None,
            draft_title: String::new(),
            draft_description: String::new(),
            draft_features: String::new(),
            draft_technologies: String::new(),
            draft_order_index: order_index,
            draft_is_active: true,
            existing_icon: None,
        }
    }

    fn from_draft(form: &FormData, action: String, heading: &str, error: String) -> Self {
        Self {
            heading: heading.to_string(),
            action,
            error: Some(error),
            draft_title: form.field("title").to_string(),
            draft_description: form.field("description").to_string(),
            draft_features: form.field("features").to_string(),
            draft_technologies: form.field("technologies").to_string(),
            draft_order_index: form.field("order_index").trim().parse().unwrap_or(0),
            draft_is_active: form.checkbox("is_active"),
            existing_icon: form.optional_field("existing_icon"),
        }
    }
}

/// Generic failure notice for service writes.
const SAVE_FAILED: &str = "Saving the service failed. Your draft is still here - try again.";

/// Fetch services in display order.
async fn ordered_services(state: &AppState) -> Result<Vec<Service>, AppError> {
    let mut services = state.data().list_services().await?;
    services.sort_by_key(|s| s.order_index);
    Ok(services)
}

/// Display the admin service list in display order.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> impl IntoResponse {
    let services = match ordered_services(&state).await {
        Ok(services) => {
            let last = services.len().saturating_sub(1);
            services
                .iter()
                .enumerate()
                .map(|(i, s)| ServiceRowView {
                    id: s.id.to_string(),
                    title: s.title.clone(),
                    order_index: s.order_index,
                    is_active: s.is_active,
                    is_first: i == 0,
                    is_last: i == last,
                })
                .collect()
        }
        Err(error) => {
            tracing::warn!(%error, "Failed to load services for admin list");
            Vec::new()
        }
    };

    ServicesIndexTemplate { services }
}

/// Display the empty new-service form. The draft's order index defaults to
/// the end of the current collection.
#[instrument(skip(state, _admin))]
pub async fn new_page(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> impl IntoResponse {
    let next_index = match state.data().list_services().await {
        Ok(services) => i32::try_from(services.len()).unwrap_or(i32::MAX),
        Err(error) => {
            tracing::warn!(%error, "Failed to count services for new form");
            0
        }
    };

    ServiceFormTemplate::empty(next_index)
}

/// Display the edit form for an existing service.
#[instrument(skip(state, _admin))]
pub async fn edit_page(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<ServiceId>,
) -> Result<ServiceFormTemplate, AppError> {
    let services = state.data().list_services().await?;
    let service = services
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| AppError::NotFound(format!("service {id}")))?;

    let features = join_lines(&service.features)
        .map_err(|error| AppError::Internal(error.to_string()))?;
    let technologies = join_lines(&service.technologies)
        .map_err(|error| AppError::Internal(error.to_string()))?;

    Ok(ServiceFormTemplate {
        heading: "Edit service".to_string(),
        action: format!("/admin/services/{id}"),
        error: None,
        draft_title: service.title.clone(),
        draft_description: service.description.clone(),
        draft_features: features,
        draft_technologies: technologies,
        draft_order_index: service.order_index,
        draft_is_active: service.is_active,
        existing_icon: service.icon.clone(),
    })
}

/// Create a service from the submitted form.
#[instrument(skip(state, admin, multipart))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = FormData::read(multipart).await?;
    let action = "/admin/services".to_string();

    if form.field("title").trim().is_empty() {
        return Ok(ServiceFormTemplate::from_draft(
            &form,
            action,
            "New service",
            "A title is required.".to_string(),
        )
        .into_response());
    }

    let icon = match resolve_icon(&state, &admin, &form).await {
        Ok(key) => key,
        Err(error) => {
            tracing::warn!(%error, "Icon upload failed");
            return Ok(ServiceFormTemplate::from_draft(
                &form,
                action,
                "New service",
                SAVE_FAILED.to_string(),
            )
            .into_response());
        }
    };

    let input = ServiceInput {
        title: form.field("title").trim().to_string(),
        description: form.field("description").to_string(),
        features: split_lines(form.field("features")),
        technologies: split_lines(form.field("technologies")),
        icon,
        order_index: form.field("order_index").trim().parse().unwrap_or(0),
        is_active: form.checkbox("is_active"),
        created_at: Utc::now(),
    };

    match state.data().create_service(&admin.token, &input).await {
        Ok(_) => {
            state.cache().invalidate_services().await;
            Ok(Redirect::to("/admin/services").into_response())
        }
        Err(error) => {
            tracing::warn!(%error, "Failed to create service");
            Ok(ServiceFormTemplate::from_draft(
                &form,
                action,
                "New service",
                SAVE_FAILED.to_string(),
            )
            .into_response())
        }
    }
}

/// Update a service from the submitted form.
#[instrument(skip(state, admin, multipart))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<ServiceId>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = FormData::read(multipart).await?;
    let action = format!("/admin/services/{id}");

    let icon = match resolve_icon(&state, &admin, &form).await {
        Ok(key) => key,
        Err(error) => {
            tracing::warn!(%error, "Icon upload failed");
            return Ok(ServiceFormTemplate::from_draft(
                &form,
                action,
                "Edit service",
                SAVE_FAILED.to_string(),
            )
            .into_response());
        }
    };

    let patch = ServicePatch {
        title: Some(form.field("title").trim().to_string()),
        description: Some(form.field("description").to_string()),
        features: Some(split_lines(form.field("features"))),
        technologies: Some(split_lines(form.field("technologies"))),
        icon,
        order_index: form
            .field("order_index")
            .trim()
            .parse()
            .ok(),
        is_active: Some(form.checkbox("is_active")),
    };

    match state.data().update_service(&admin.token, &id, &patch).await {
        Ok(_) => {
            state.cache().invalidate_services().await;
            Ok(Redirect::to("/admin/services").into_response())
        }
        Err(error) => {
            tracing::warn!(%error, "Failed to update service");
            Ok(ServiceFormTemplate::from_draft(
                &form,
                action,
                "Edit service",
                SAVE_FAILED.to_string(),
            )
            .into_response())
        }
    }
}

/// Delete a service and return to the list.
#[instrument(skip(state, admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<ServiceId>,
) -> impl IntoResponse {
    if let Err(error) = state.data().delete_service(&admin.token, &id).await {
        tracing::warn!(%error, "Failed to delete service");
    } else {
        state.cache().invalidate_services().await;
    }
    Redirect::to("/admin/services")
}

/// Move form payload.
#[derive(Debug, Deserialize)]
pub struct MoveForm {
    pub direction: Direction,
}

/// Move a service up or down one position.
///
/// Swaps the service with its neighbor, then rewrites every record's
/// `orderIndex` to its position so the sequence stays dense. The rewrites
/// run concurrently and are all awaited before redirecting; moving past
/// either end is a no-op.
#[instrument(skip(state, admin))]
pub async fn move_service(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<ServiceId>,
    Form(form): Form<MoveForm>,
) -> Result<impl IntoResponse, AppError> {
    let mut services = ordered_services(&state).await?;

    let Some(index) = services.iter().position(|s| s.id == id) else {
        return Err(AppError::NotFound(format!("service {id}")));
    };

    if move_item(&mut services, index, form.direction) {
        let updates = services.iter().enumerate().map(|(position, service)| {
            let patch = ServicePatch {
                order_index: Some(i32::try_from(position).unwrap_or(i32::MAX)),
                ..Default::default()
            };
            let data = state.data();
            let token = &admin.token;
            async move { data.update_service(token, &service.id, &patch).await }
        });

        if let Err(error) = try_join_all(updates).await {
            tracing::warn!(%error, "Failed to rewrite service order");
        }
        state.cache().invalidate_services().await;
    }

    Ok(Redirect::to("/admin/services"))
}

/// Upload a newly-selected icon, or keep the key from the hidden field.
async fn resolve_icon(
    state: &AppState,
    admin: &CurrentAdmin,
    form: &FormData,
) -> Result<Option<String>, crate::backend::BackendError> {
    match form.file("icon") {
        Some(file) => {
            let key =
                upload_file(state.storage(), &admin.token, StoragePrefix::Services, file).await?;
            Ok(Some(key.into_inner()))
        }
        None => Ok(form.optional_field("existing_icon")),
    }
}
