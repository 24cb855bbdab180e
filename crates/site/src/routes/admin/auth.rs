//! Admin login and logout handlers.
//!
//! Sign-in delegates credential checks to the identity facade; the session
//! only ever stores the resulting bearer token. Logout invalidates both
//! sides: the token server-side and the session cookie locally.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use portfolio_core::Email;

use crate::middleware::{OptionalAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Login form payload.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub draft_email: String,
}

/// Display the login page; already-authenticated owners skip to the
/// dashboard.
pub async fn login_page(OptionalAdminAuth(admin): OptionalAdminAuth) -> impl IntoResponse {
    if admin.is_some() {
        return Redirect::to("/admin").into_response();
    }
    LoginTemplate {
        error: None,
        draft_email: String::new(),
    }
    .into_response()
}

/// Handle a login attempt.
///
/// Wrong credentials and transport failures alike re-render the form with
/// one generic message; nothing distinguishes which check failed.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    const FAILED: &str = "Sign-in failed. Check your email and password.";

    let Ok(email) = Email::parse(&form.email) else {
        return LoginTemplate {
            error: Some(FAILED.to_string()),
            draft_email: form.email,
        }
        .into_response();
    };

    let signed_in = match state.identity().sign_in(&email, &form.password).await {
        Ok(signed_in) => signed_in,
        Err(error) => {
            tracing::warn!(%error, "Sign-in rejected");
            return LoginTemplate {
                error: Some(FAILED.to_string()),
                draft_email: form.email,
            }
            .into_response();
        }
    };

    let display_name = signed_in
        .display_name
        .unwrap_or_else(|| email.as_str().to_string());
    let admin = CurrentAdmin {
        email,
        display_name,
        token: signed_in.token,
    };

    if let Err(error) = set_current_admin(&session, &admin).await {
        tracing::error!(%error, "Failed to persist session");
        return LoginTemplate {
            error: Some(FAILED.to_string()),
            draft_email: admin.email.as_str().to_string(),
        }
        .into_response();
    }

    Redirect::to("/admin").into_response()
}

/// Handle logout: invalidate the bearer token at the backend, then destroy
/// the session.
#[instrument(skip(state, session, admin))]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
    OptionalAdminAuth(admin): OptionalAdminAuth,
) -> impl IntoResponse {
    if let Some(admin) = admin {
        // Token invalidation is best-effort; the session is destroyed
        // regardless so the cookie can never be replayed.
        if let Err(error) = state.identity().sign_out(&admin.token).await {
            tracing::warn!(%error, "Backend sign-out failed");
        }
    }

    if let Err(error) = clear_current_admin(&session).await {
        tracing::warn!(%error, "Failed to clear session data");
    }
    if let Err(error) = session.flush().await {
        tracing::warn!(%error, "Failed to destroy session");
    }

    Redirect::to("/")
}
