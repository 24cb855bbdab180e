//! Public page rendering and the admin session lifecycle.

use reqwest::StatusCode;
use serde_json::json;

use portfolio_integration_tests::{OWNER_NAME, TestContext, redirect_target};

#[tokio::test]
async fn health_check_responds() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .get(ctx.url("/health"))
        .send()
        .await
        .expect("health request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.expect("body"), "ok");
}

#[tokio::test]
async fn public_pages_render_without_a_session() {
    let ctx = TestContext::new().await;

    for path in ["/", "/services", "/blog", "/contact"] {
        let response = ctx
            .client
            .get(ctx.url(path))
            .send()
            .await
            .expect("page request");
        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
    }
}

#[tokio::test]
async fn blog_shows_published_posts_only() {
    let ctx = TestContext::new().await;

    ctx.backend.insert_record(
        "blog-posts",
        json!({
            "title": "Shipped and public",
            "content": "It's live.",
            "category": "news",
            "status": "PUBLISHED",
            "createdAt": "2026-02-01T00:00:00Z"
        }),
    );
    let draft = ctx.backend.insert_record(
        "blog-posts",
        json!({
            "title": "Still cooking",
            "content": "Not yet.",
            "category": "news",
            "status": "DRAFT",
            "createdAt": "2026-02-02T00:00:00Z"
        }),
    );

    let index = ctx
        .client
        .get(ctx.url("/blog"))
        .send()
        .await
        .expect("blog index");
    assert_eq!(index.status(), StatusCode::OK);
    let body = index.text().await.expect("body");
    assert!(body.contains("Shipped and public"));
    assert!(!body.contains("Still cooking"));

    // Drafts are invisible even by direct URL
    let draft_id = draft["id"].as_str().expect("id");
    let response = ctx
        .client
        .get(ctx.url(&format!("/blog/{draft_id}")))
        .send()
        .await
        .expect("draft request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn home_features_only_flagged_projects() {
    let ctx = TestContext::new().await;

    ctx.backend.insert_record(
        "projects",
        json!({
            "title": "Front and center",
            "description": "Featured",
            "technologies": [],
            "images": [],
            "isFeatured": true,
            "createdAt": "2026-01-01T00:00:00Z"
        }),
    );
    ctx.backend.insert_record(
        "projects",
        json!({
            "title": "Background work",
            "description": "Not featured",
            "technologies": [],
            "images": [],
            "isFeatured": false,
            "createdAt": "2026-01-02T00:00:00Z"
        }),
    );

    let response = ctx.client.get(ctx.url("/")).send().await.expect("home");
    let body = response.text().await.expect("body");
    assert!(body.contains("Front and center"));
    assert!(!body.contains("Background work"));
}

#[tokio::test]
async fn services_page_hides_inactive_services() {
    let ctx = TestContext::new().await;

    ctx.backend.insert_record(
        "services",
        json!({
            "title": "Web development",
            "description": "Active offering",
            "features": ["Design", "Build"],
            "technologies": [],
            "orderIndex": 0,
            "isActive": true,
            "createdAt": "2026-01-01T00:00:00Z"
        }),
    );
    ctx.backend.insert_record(
        "services",
        json!({
            "title": "Retired offering",
            "description": "No longer sold",
            "features": [],
            "technologies": [],
            "orderIndex": 1,
            "isActive": false,
            "createdAt": "2026-01-01T00:00:00Z"
        }),
    );

    let response = ctx
        .client
        .get(ctx.url("/services"))
        .send()
        .await
        .expect("services");
    let body = response.text().await.expect("body");
    assert!(body.contains("Web development"));
    assert!(!body.contains("Retired offering"));
}

#[tokio::test]
async fn admin_pages_redirect_to_login_without_a_session() {
    let ctx = TestContext::new().await;

    for path in ["/admin", "/admin/posts", "/admin/services", "/admin/projects", "/admin/messages"]
    {
        let response = ctx
            .client
            .get(ctx.url(path))
            .send()
            .await
            .expect("admin request");
        assert!(response.status().is_redirection(), "GET {path}");
        assert_eq!(redirect_target(&response), "/admin/login", "GET {path}");
    }
}

#[tokio::test]
async fn login_then_dashboard_then_logout() {
    let ctx = TestContext::new().await;
    ctx.login().await;
    assert_eq!(ctx.backend.active_token_count(), 1);

    let dashboard = ctx
        .client
        .get(ctx.url("/admin"))
        .send()
        .await
        .expect("dashboard request");
    assert_eq!(dashboard.status(), StatusCode::OK);
    let body = dashboard.text().await.expect("body");
    assert!(body.contains(OWNER_NAME));

    let logout = ctx
        .client
        .post(ctx.url("/admin/logout"))
        .send()
        .await
        .expect("logout request");
    assert!(logout.status().is_redirection());
    assert_eq!(redirect_target(&logout), "/");

    // The bearer token is gone server-side, not just the cookie
    assert_eq!(ctx.backend.active_token_count(), 0);

    let after = ctx
        .client
        .get(ctx.url("/admin"))
        .send()
        .await
        .expect("post-logout request");
    assert!(after.status().is_redirection());
    assert_eq!(redirect_target(&after), "/admin/login");
}

#[tokio::test]
async fn wrong_credentials_re_render_the_login_form() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(ctx.url("/admin/login"))
        .form(&[
            ("email", "dan@okoye.dev"),
            ("password", "definitely-wrong"),
        ])
        .send()
        .await
        .expect("login request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("body");
    assert!(body.contains("Sign-in failed"));
    assert_eq!(ctx.backend.active_token_count(), 0);
}

#[tokio::test]
async fn dashboard_counts_and_activity_reflect_the_backend() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    ctx.backend.insert_record(
        "blog-posts",
        json!({
            "title": "Counted post",
            "content": "Body",
            "category": "news",
            "status": "DRAFT",
            "createdAt": "2026-03-01T00:00:00Z"
        }),
    );
    ctx.backend.insert_record(
        "contacts",
        json!({
            "name": "Prospect",
            "email": "prospect@example.com",
            "message": "Ping",
            "status": "NEW",
            "createdAt": "2026-03-02T00:00:00Z"
        }),
    );
    ctx.backend.insert_record(
        "contacts",
        json!({
            "name": "Old thread",
            "email": "old@example.com",
            "message": "Done already",
            "status": "REPLIED",
            "createdAt": "2026-03-03T00:00:00Z"
        }),
    );

    let response = ctx
        .client
        .get(ctx.url("/admin"))
        .send()
        .await
        .expect("dashboard request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("body");

    // Counts: one post, one NEW message (the replied one is filtered out)
    assert!(body.contains("Counted post"));
    assert!(body.contains("Message from Prospect"));
    assert!(!body.contains("Old thread"));
}

#[tokio::test]
async fn dashboard_discards_all_stats_when_one_query_fails() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    ctx.backend.insert_record(
        "services",
        json!({
            "title": "Consulting",
            "description": "Advice",
            "features": [],
            "orderIndex": 0,
            "isActive": true,
            "createdAt": "2026-03-01T00:00:00Z"
        }),
    );
    ctx.backend.insert_record(
        "contacts",
        json!({
            "name": "Prospect",
            "email": "prospect@example.com",
            "message": "Ping",
            "status": "NEW",
            "createdAt": "2026-03-02T00:00:00Z"
        }),
    );
    ctx.backend.fail_lists_for("blog-posts");

    let response = ctx
        .client
        .get(ctx.url("/admin"))
        .send()
        .await
        .expect("dashboard request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("body");

    // One failed query zeroes the whole stats block, surviving results
    // included, and empties the activity feed
    assert_eq!(body.matches(r#"<span class="stat-value">0</span>"#).count(), 4);
    assert!(!body.contains("Message from Prospect"));
    assert!(body.contains("Nothing yet."));
}
