//! Record and input types for the managed backend's data API.
//!
//! Wire representation is JSON with camelCase field names; timestamps are
//! RFC 3339. Records carry the backend-assigned id plus `createdAt` and
//! `updatedAt`; `createdAt` is set once at creation and `updatedAt` is
//! refreshed by the backend on every mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use portfolio_core::{BlogPostId, ContactId, ContactStatus, PostStatus, ProjectId, ServiceId};

/// Wrapper for list responses: `{"items": [...]}`.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
}

// =============================================================================
// Project
// =============================================================================

/// A portfolio project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Ordered list of technology names.
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    /// Storage keys of gallery images (binaries live in file storage).
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    pub images: Vec<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a project. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

// =============================================================================
// Service
// =============================================================================

/// A service offering shown on the services page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: ServiceId,
    pub title: String,
    pub description: String,
    /// Ordered list of feature bullet points.
    #[serde(default)]
    pub features: Vec<String>,
    /// Ordered list of technology names.
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Storage key of the service icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Display position; dense `0..N-1` across all services after a reorder.
    pub order_index: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const fn default_true() -> bool {
    true
}

/// Fields for creating a service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a service. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// =============================================================================
// Contact
// =============================================================================

/// An inbound message from the public contact form.
///
/// Visitors can create these but never read them back; only the site owner
/// lists, updates, or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a contact message. Status is always `NEW`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a contact message (status changes).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,
}

// =============================================================================
// Blog post
// =============================================================================

/// A blog post. Content is markdown, rendered on the public blog pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: PostStatus,
    /// Storage key of the featured image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a blog post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostInput {
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: PostStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a blog post. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_wire_format_is_camel_case() {
        let input = ProjectInput {
            title: "Demo".to_string(),
            description: "A demo".to_string(),
            technologies: vec!["React".to_string(), "TypeScript".to_string()],
            live_url: None,
            github_url: Some("https://github.com/example/demo".to_string()),
            images: vec![],
            is_featured: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&input).expect("serialize");
        assert!(json.get("githubUrl").is_some());
        assert!(json.get("isFeatured").is_some());
        assert!(json.get("createdAt").is_some());
        // Absent optionals are omitted entirely, not null
        assert!(json.get("liveUrl").is_none());
    }

    #[test]
    fn patch_omits_untouched_fields() {
        let patch = ProjectPatch {
            is_featured: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).expect("serialize");
        let map = json.as_object().expect("object");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("isFeatured"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn service_defaults_apply_on_deserialize() {
        let record: Service = serde_json::from_value(serde_json::json!({
            "id": "s-1",
            "title": "Web Development",
            "description": "Sites",
            "orderIndex": 0,
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-01T00:00:00Z"
        }))
        .expect("deserialize");

        assert!(record.is_active);
        assert!(record.features.is_empty());
        assert!(record.icon.is_none());
    }
}
