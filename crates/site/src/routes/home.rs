//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::backend::Project;
use crate::filters;
use crate::state::AppState;

/// Project display data for templates.
#[derive(Clone)]
pub struct ProjectView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub image_urls: Vec<String>,
}

impl ProjectView {
    pub fn from_record(project: &Project, state: &AppState) -> Self {
        let image_urls = project
            .images
            .iter()
            .map(|key| {
                state
                    .storage()
                    .public_url(&portfolio_core::StorageKey::from_existing(key.clone()))
            })
            .collect();
        Self {
            id: project.id.to_string(),
            title: project.title.clone(),
            description: project.description.clone(),
            technologies: project.technologies.clone(),
            live_url: project.live_url.clone(),
            github_url: project.github_url.clone(),
            image_urls,
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured_projects: Vec<ProjectView>,
}

/// Display the home page with featured projects.
///
/// A failed project fetch is logged and the page renders without the
/// featured section rather than erroring.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let featured_projects = match state.cache().projects(state.data()).await {
        Ok(projects) => projects
            .iter()
            .filter(|p| p.is_featured)
            .map(|p| ProjectView::from_record(p, &state))
            .collect(),
        Err(error) => {
            tracing::warn!(%error, "Failed to load projects for home page");
            Vec::new()
        }
    };

    HomeTemplate { featured_projects }
}
