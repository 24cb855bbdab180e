//! Contact page route handlers.
//!
//! The contact form is the single public write path: anyone can create a
//! message, nobody but the owner can read one back.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use portfolio_core::{ContactStatus, Email};

use crate::backend::ContactInput;
use crate::filters;
use crate::state::AppState;

/// Contact form submission payload.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Query parameters for the contact page.
#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    /// Set after a successful submission (redirect-after-post).
    pub sent: Option<u8>,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    /// Confirmation banner after a successful submission.
    pub sent: bool,
    /// Generic failure notice; the submitted draft is re-rendered with it.
    pub error: Option<String>,
    pub draft_name: String,
    pub draft_email: String,
    pub draft_message: String,
}

impl ContactTemplate {
    fn empty(sent: bool) -> Self {
        Self {
            sent,
            error: None,
            draft_name: String::new(),
            draft_email: String::new(),
            draft_message: String::new(),
        }
    }

    fn with_draft(form: ContactForm, error: String) -> Self {
        Self {
            sent: false,
            error: Some(error),
            draft_name: form.name,
            draft_email: form.email,
            draft_message: form.message,
        }
    }
}

/// Display the contact form.
pub async fn page(Query(query): Query<ContactQuery>) -> impl IntoResponse {
    ContactTemplate::empty(query.sent.is_some())
}

/// Handle a contact form submission.
///
/// New messages always start in status NEW. A failed write keeps the
/// visitor's draft on screen with a generic retry notice.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> impl IntoResponse {
    if form.name.trim().is_empty() || form.message.trim().is_empty() {
        return ContactTemplate::with_draft(form, "Please fill in every field.".to_string())
            .into_response();
    }

    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(_) => {
            return ContactTemplate::with_draft(
                form,
                "Please enter a valid email address.".to_string(),
            )
            .into_response();
        }
    };

    let input = ContactInput {
        name: form.name.trim().to_string(),
        email: email.to_string(),
        message: form.message.trim().to_string(),
        status: ContactStatus::New,
        created_at: Utc::now(),
    };

    match state.data().create_contact(&input).await {
        Ok(_) => Redirect::to("/contact?sent=1").into_response(),
        Err(error) => {
            tracing::warn!(%error, "Failed to store contact message");
            ContactTemplate::with_draft(
                form,
                "Something went wrong sending your message. Please try again.".to_string(),
            )
            .into_response()
        }
    }
}
