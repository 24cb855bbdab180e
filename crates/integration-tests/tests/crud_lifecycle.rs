//! Project CRUD lifecycle, driven through the admin forms.

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use portfolio_integration_tests::{TestContext, redirect_target};

fn project_form(title: &str, description: &str) -> Form {
    Form::new()
        .text("title", title.to_string())
        .text("description", description.to_string())
        .text("technologies", "React\nTypeScript")
        .text("github_url", "https://github.com/dokoye/demo")
        .text("live_url", "")
        .text("existing_images", "")
}

#[tokio::test]
async fn create_project_appears_in_backend_and_list() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    // Fresh install: the list starts empty
    let empty_page = ctx
        .client
        .get(ctx.url("/admin/projects"))
        .send()
        .await
        .expect("empty list request");
    assert_eq!(empty_page.status(), StatusCode::OK);
    assert!(ctx.backend.records("projects").is_empty());

    let response = ctx
        .client
        .post(ctx.url("/admin/projects"))
        .multipart(project_form("Demo", "A demo"))
        .send()
        .await
        .expect("create request");
    assert!(response.status().is_redirection());
    assert_eq!(redirect_target(&response), "/admin/projects");

    let records = ctx.backend.records("projects");
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["title"], "Demo");
    assert_eq!(record["description"], "A demo");
    assert_eq!(
        record["technologies"],
        serde_json::json!(["React", "TypeScript"])
    );
    assert_eq!(record["images"], serde_json::json!([]));
    assert_eq!(record["githubUrl"], "https://github.com/dokoye/demo");
    assert_eq!(record["isFeatured"], false);
    assert!(record.get("liveUrl").is_none() || record["liveUrl"].is_null());
    assert!(record["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(record["createdAt"].as_str().is_some());

    let list_page = ctx
        .client
        .get(ctx.url("/admin/projects"))
        .send()
        .await
        .expect("list request");
    assert_eq!(list_page.status(), StatusCode::OK);
    let body = list_page.text().await.expect("list body");
    assert!(body.contains("Demo"));
}

#[tokio::test]
async fn update_preserves_untouched_images() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let record = ctx.backend.insert_record(
        "projects",
        serde_json::json!({
            "title": "Gallery",
            "description": "Before edit",
            "technologies": ["Rust"],
            "images": ["projects/100-a.png", "projects/200-b.png"],
            "isFeatured": false,
            "createdAt": "2026-01-01T00:00:00Z"
        }),
    );
    let id = record["id"].as_str().expect("id").to_string();

    // The edit form carries the current keys in its hidden field; submit a
    // title change with no new files.
    let form = Form::new()
        .text("title", "Gallery (renamed)")
        .text("description", "Before edit")
        .text("technologies", "Rust")
        .text("existing_images", "projects/100-a.png\nprojects/200-b.png");

    let response = ctx
        .client
        .post(ctx.url(&format!("/admin/projects/{id}")))
        .multipart(form)
        .send()
        .await
        .expect("update request");
    assert!(response.status().is_redirection());

    let records = ctx.backend.records("projects");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["title"], "Gallery (renamed)");
    assert_eq!(
        records[0]["images"],
        serde_json::json!(["projects/100-a.png", "projects/200-b.png"])
    );
}

#[tokio::test]
async fn new_gallery_images_upload_before_the_record_write() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let form = project_form("Uploads", "With images")
        .part(
            "images",
            Part::bytes(vec![0x89, 0x50, 0x4e, 0x47])
                .file_name("one.png")
                .mime_str("image/png")
                .expect("mime"),
        )
        .part(
            "images",
            Part::bytes(vec![0x89, 0x50, 0x4e, 0x47, 0x00])
                .file_name("two.png")
                .mime_str("image/png")
                .expect("mime"),
        );

    let response = ctx
        .client
        .post(ctx.url("/admin/projects"))
        .multipart(form)
        .send()
        .await
        .expect("create request");
    assert!(response.status().is_redirection());

    let keys = ctx.backend.upload_keys();
    assert_eq!(keys.len(), 2);
    assert!(keys.iter().all(|k| k.starts_with("projects/")));
    assert!(keys.iter().any(|k| k.ends_with("-one.png")));
    assert!(keys.iter().any(|k| k.ends_with("-two.png")));

    let records = ctx.backend.records("projects");
    assert_eq!(records.len(), 1);
    let images = records[0]["images"].as_array().expect("images array");
    assert_eq!(images.len(), 2);
    // Every key on the record corresponds to a completed upload
    for key in images {
        let key = key.as_str().expect("key string");
        assert!(ctx.backend.uploaded(key).is_some(), "missing upload {key}");
    }
}

#[tokio::test]
async fn failed_gallery_upload_aborts_before_the_record_write() {
    let ctx = TestContext::new().await;
    ctx.login().await;
    ctx.backend.fail_uploads();

    let form = project_form("Doomed uploads", "Storage is down").part(
        "images",
        Part::bytes(vec![0x89, 0x50, 0x4e, 0x47])
            .file_name("one.png")
            .mime_str("image/png")
            .expect("mime"),
    );

    let response = ctx
        .client
        .post(ctx.url("/admin/projects"))
        .multipart(form)
        .send()
        .await
        .expect("create request");

    // The form re-renders with the draft and a notice; nothing is written
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("form body");
    assert!(body.contains("Saving the project failed"));
    assert!(body.contains("Doomed uploads"));
    assert!(body.contains("Storage is down"));

    assert!(ctx.backend.records("projects").is_empty());
    assert!(ctx.backend.upload_keys().is_empty());
}

#[tokio::test]
async fn toggle_featured_twice_restores_the_record() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let record = ctx.backend.insert_record(
        "projects",
        serde_json::json!({
            "title": "Flip",
            "description": "Toggle test",
            "technologies": [],
            "images": [],
            "isFeatured": false,
            "createdAt": "2026-01-01T00:00:00Z"
        }),
    );
    let id = record["id"].as_str().expect("id").to_string();

    let toggle = |ctx: &TestContext| {
        let url = ctx.url(&format!("/admin/projects/{id}/feature"));
        let client = ctx.client.clone();
        async move { client.post(url).send().await.expect("toggle request") }
    };

    toggle(&ctx).await;
    let flipped = &ctx.backend.records("projects")[0];
    assert_eq!(flipped["isFeatured"], true);

    toggle(&ctx).await;
    let restored = &ctx.backend.records("projects")[0];
    assert_eq!(restored["isFeatured"], false);

    // Round trip leaves every field as it was, except the write timestamp
    let strip = |mut v: Value| {
        v.as_object_mut().expect("object").remove("updatedAt");
        v
    };
    assert_eq!(strip(record), strip(restored.clone()));
}

#[tokio::test]
async fn delete_removes_the_record() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let record = ctx.backend.insert_record(
        "projects",
        serde_json::json!({
            "title": "Doomed",
            "description": "To be deleted",
            "technologies": [],
            "images": [],
            "isFeatured": false,
            "createdAt": "2026-01-01T00:00:00Z"
        }),
    );
    let id = record["id"].as_str().expect("id").to_string();

    let response = ctx
        .client
        .post(ctx.url(&format!("/admin/projects/{id}/delete")))
        .send()
        .await
        .expect("delete request");
    assert!(response.status().is_redirection());

    assert!(ctx.backend.records("projects").is_empty());
}

#[tokio::test]
async fn blog_post_create_uploads_featured_image_first() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let form = Form::new()
        .text("title", "Hello world")
        .text("category", "general")
        .text("status", "PUBLISHED")
        .text("content", "# Hello\n\nFirst post.")
        .part(
            "featured_image",
            Part::bytes(vec![1, 2, 3])
                .file_name("cover.jpg")
                .mime_str("image/jpeg")
                .expect("mime"),
        );

    let response = ctx
        .client
        .post(ctx.url("/admin/posts"))
        .multipart(form)
        .send()
        .await
        .expect("create request");
    assert!(response.status().is_redirection());
    assert_eq!(redirect_target(&response), "/admin/posts");

    let records = ctx.backend.records("blog-posts");
    assert_eq!(records.len(), 1);
    let key = records[0]["featuredImage"].as_str().expect("image key");
    assert!(key.starts_with("blog/"));
    assert!(key.ends_with("-cover.jpg"));

    let object = ctx.backend.uploaded(key).expect("uploaded object");
    assert_eq!(object.content_type, "image/jpeg");
    assert_eq!(object.size, 3);
}

#[tokio::test]
async fn mutations_without_a_session_redirect_to_login() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(ctx.url("/admin/projects"))
        .multipart(project_form("Nope", "Unauthenticated"))
        .send()
        .await
        .expect("request");

    assert!(response.status().is_redirection());
    assert_eq!(redirect_target(&response), "/admin/login");
    assert!(ctx.backend.records("projects").is_empty());
}
