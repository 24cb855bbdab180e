//! Services page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::backend::Service;
use crate::filters;
use crate::state::AppState;

/// Service display data for templates.
#[derive(Clone)]
pub struct ServiceView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub technologies: Vec<String>,
    pub icon_url: Option<String>,
}

impl ServiceView {
    pub fn from_record(service: &Service, state: &AppState) -> Self {
        let icon_url = service.icon.as_ref().map(|key| {
            state
                .storage()
                .public_url(&portfolio_core::StorageKey::from_existing(key.clone()))
        });
        Self {
            id: service.id.to_string(),
            title: service.title.clone(),
            description: service.description.clone(),
            features: service.features.clone(),
            technologies: service.technologies.clone(),
            icon_url,
        }
    }
}

/// Services page template.
#[derive(Template, WebTemplate)]
#[template(path = "services.html")]
pub struct ServicesTemplate {
    pub services: Vec<ServiceView>,
}

/// Display active services in display order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let services = match state.cache().services(state.data()).await {
        Ok(services) => {
            let mut active: Vec<&Service> =
                services.iter().filter(|s| s.is_active).collect();
            active.sort_by_key(|s| s.order_index);
            active
                .into_iter()
                .map(|s| ServiceView::from_record(s, &state))
                .collect()
        }
        Err(error) => {
            tracing::warn!(%error, "Failed to load services");
            Vec::new()
        }
    };

    ServicesTemplate { services }
}
