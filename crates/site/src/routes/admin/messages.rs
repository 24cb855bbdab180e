//! Admin contact inbox handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use portfolio_core::{ContactId, ContactStatus};

use crate::backend::{Contact, ContactPatch};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Message row for the inbox.
#[derive(Clone)]
pub struct MessageView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: String,
    pub received_on: String,
}

impl From<&Contact> for MessageView {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            message: contact.message.clone(),
            status: contact.status.as_str().to_string(),
            received_on: contact.created_at.format("%B %-d, %Y").to_string(),
        }
    }
}

/// Inbox query parameters.
#[derive(Debug, Deserialize)]
pub struct InboxQuery {
    /// Optional status filter (NEW, READ, REPLIED).
    pub status: Option<ContactStatus>,
}

/// Inbox template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/messages/index.html")]
pub struct MessagesIndexTemplate {
    pub messages: Vec<MessageView>,
    pub filter: Option<String>,
}

/// Display the contact inbox, newest first, optionally filtered by status.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(query): Query<InboxQuery>,
) -> impl IntoResponse {
    let messages = match state.data().list_contacts(&admin.token, query.status).await {
        Ok(mut contacts) => {
            contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            contacts.iter().map(MessageView::from).collect()
        }
        Err(error) => {
            tracing::warn!(%error, "Failed to load contact messages");
            Vec::new()
        }
    };

    MessagesIndexTemplate {
        messages,
        filter: query.status.map(|s| s.as_str().to_string()),
    }
}

/// Status form payload.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: ContactStatus,
}

/// Mark a message READ or REPLIED.
#[instrument(skip(state, admin))]
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<ContactId>,
    Form(form): Form<StatusForm>,
) -> impl IntoResponse {
    let patch = ContactPatch {
        status: Some(form.status),
    };
    if let Err(error) = state.data().update_contact(&admin.token, &id, &patch).await {
        tracing::warn!(%error, "Failed to update message status");
    }
    Redirect::to("/admin/messages")
}

/// Delete a message permanently.
#[instrument(skip(state, admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<ContactId>,
) -> impl IntoResponse {
    if let Err(error) = state.data().delete_contact(&admin.token, &id).await {
        tracing::warn!(%error, "Failed to delete message");
    }
    Redirect::to("/admin/messages")
}
