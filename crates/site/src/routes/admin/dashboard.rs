//! Admin dashboard handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use chrono::{DateTime, Utc};
use tracing::instrument;

use portfolio_core::ContactStatus;

use crate::backend::{BackendError, BlogPost, Contact};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// One row in the recent-activity feed.
#[derive(Clone)]
pub struct ActivityView {
    /// What kind of record this is ("Post" or "Message").
    pub kind: &'static str,
    pub title: String,
    pub when: String,
}

/// Number of activity rows shown.
const ACTIVITY_LIMIT: usize = 5;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub admin_name: String,
    pub post_count: usize,
    pub service_count: usize,
    pub project_count: usize,
    pub new_message_count: usize,
    pub activity: Vec<ActivityView>,
}

fn merge_activity(posts: &[BlogPost], messages: &[Contact]) -> Vec<ActivityView> {
    let mut entries: Vec<(DateTime<Utc>, ActivityView)> = Vec::new();

    for post in posts {
        entries.push((
            post.created_at,
            ActivityView {
                kind: "Post",
                title: post.title.clone(),
                when: post.created_at.format("%B %-d, %Y").to_string(),
            },
        ));
    }
    for message in messages {
        entries.push((
            message.created_at,
            ActivityView {
                kind: "Message",
                title: format!("Message from {}", message.name),
                when: message.created_at.format("%B %-d, %Y").to_string(),
            },
        ));
    }

    entries.sort_by(|a, b| b.0.cmp(&a.0));
    entries
        .into_iter()
        .take(ACTIVITY_LIMIT)
        .map(|(_, view)| view)
        .collect()
}

/// Display the dashboard: entity counts plus recent activity.
///
/// The four list queries run in parallel as a single unit: if any of them
/// fails the whole batch is discarded and the page renders with zero
/// counts and an empty feed.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> impl IntoResponse {
    let data = state.data();
    let queries: Result<_, BackendError> = tokio::try_join!(
        data.list_posts(),
        data.list_services(),
        data.list_projects(),
        data.list_contacts(&admin.token, Some(ContactStatus::New)),
    );

    let (posts, services, projects, new_messages) = match queries {
        Ok(lists) => lists,
        Err(error) => {
            tracing::warn!(%error, "Dashboard queries failed");
            (Vec::new(), Vec::new(), Vec::new(), Vec::new())
        }
    };

    let activity = merge_activity(&posts, &new_messages);

    DashboardTemplate {
        admin_name: admin.display_name,
        post_count: posts.len(),
        service_count: services.len(),
        project_count: projects.len(),
        new_message_count: new_messages.len(),
        activity,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use portfolio_core::{BlogPostId, ContactId, PostStatus};

    use super::*;

    fn post(title: &str, day: u32) -> BlogPost {
        let at = Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap();
        BlogPost {
            id: BlogPostId::new(format!("p-{day}")),
            title: title.to_string(),
            content: String::new(),
            category: "general".to_string(),
            status: PostStatus::Published,
            featured_image: None,
            created_at: at,
            updated_at: at,
        }
    }

    fn message(name: &str, day: u32) -> Contact {
        let at = Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap();
        Contact {
            id: ContactId::new(format!("c-{day}")),
            name: name.to_string(),
            email: "visitor@example.com".to_string(),
            message: "Hi".to_string(),
            status: ContactStatus::New,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn activity_merges_newest_first_capped_at_five() {
        let posts = vec![post("One", 1), post("Five", 5), post("Nine", 9)];
        let messages = vec![
            message("Ada", 2),
            message("Grace", 6),
            message("Edsger", 10),
            message("Barbara", 12),
        ];

        let activity = merge_activity(&posts, &messages);

        assert_eq!(activity.len(), 5);
        assert_eq!(activity[0].title, "Message from Barbara");
        assert_eq!(activity[1].title, "Message from Edsger");
        assert_eq!(activity[2].title, "Nine");
        // The oldest two entries fall off the end
        assert!(activity.iter().all(|a| a.title != "One"));
    }

    #[test]
    fn activity_with_no_records_is_empty() {
        assert!(merge_activity(&[], &[]).is_empty());
    }
}
