//! Public blog route handlers.
//!
//! Post content is stored as markdown and rendered to HTML with `comrak`
//! at request time; only published posts are visible here.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use portfolio_core::{BlogPostId, PostStatus, StorageKey};

use crate::backend::BlogPost;
use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Post display data for templates.
#[derive(Clone)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub published_on: String,
    pub featured_image_url: Option<String>,
    pub content_html: String,
    /// Plain-text excerpt for the index page.
    pub excerpt: String,
}

/// Maximum excerpt length in characters.
const EXCERPT_CHARS: usize = 200;

impl PostView {
    pub fn from_record(post: &BlogPost, state: &AppState) -> Self {
        let featured_image_url = post.featured_image.as_ref().map(|key| {
            state
                .storage()
                .public_url(&StorageKey::from_existing(key.clone()))
        });
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            category: post.category.clone(),
            published_on: post.created_at.format("%B %-d, %Y").to_string(),
            featured_image_url,
            content_html: render_markdown(&post.content),
            excerpt: excerpt(&post.content),
        }
    }
}

/// Render markdown to HTML.
fn render_markdown(markdown: &str) -> String {
    let options = comrak::Options::default();
    comrak::markdown_to_html(markdown, &options)
}

/// First few sentences of the raw markdown, stripped to plain text-ish.
fn excerpt(markdown: &str) -> String {
    let text: String = markdown
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join(" ");
    let mut out: String = text.chars().take(EXCERPT_CHARS).collect();
    if text.chars().count() > EXCERPT_CHARS {
        out.push('…');
    }
    out
}

/// Blog index page template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/index.html")]
pub struct BlogIndexTemplate {
    pub posts: Vec<PostView>,
}

/// Blog post detail template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/show.html")]
pub struct BlogShowTemplate {
    pub post: PostView,
}

/// Display the blog index with published posts, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let posts = match state.cache().posts(state.data()).await {
        Ok(posts) => {
            let mut published: Vec<&BlogPost> = posts
                .iter()
                .filter(|p| p.status == PostStatus::Published)
                .collect();
            published.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            published
                .into_iter()
                .map(|p| PostView::from_record(p, &state))
                .collect()
        }
        Err(error) => {
            tracing::warn!(%error, "Failed to load blog posts");
            Vec::new()
        }
    };

    BlogIndexTemplate { posts }
}

/// Display a single published blog post.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<BlogPostId>,
) -> Result<BlogShowTemplate, AppError> {
    let posts = state.cache().posts(state.data()).await?;
    let post = posts
        .iter()
        .find(|p| p.id == id && p.status == PostStatus::Published)
        .ok_or_else(|| AppError::NotFound(format!("blog post {id}")))?;

    Ok(BlogShowTemplate {
        post: PostView::from_record(post, &state),
    })
}
