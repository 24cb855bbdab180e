//! Contact inbox management in the admin panel.

use reqwest::StatusCode;
use serde_json::json;

use portfolio_integration_tests::TestContext;

fn seed_message(ctx: &TestContext, name: &str, status: &str) -> String {
    let record = ctx.backend.insert_record(
        "contacts",
        json!({
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "message": "Hello",
            "status": status,
            "createdAt": "2026-04-01T00:00:00Z"
        }),
    );
    record["id"].as_str().expect("id").to_string()
}

#[tokio::test]
async fn inbox_filters_by_status() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    seed_message(&ctx, "Fresh", "NEW");
    seed_message(&ctx, "Handled", "REPLIED");

    let all = ctx
        .client
        .get(ctx.url("/admin/messages"))
        .send()
        .await
        .expect("inbox request");
    assert_eq!(all.status(), StatusCode::OK);
    let body = all.text().await.expect("body");
    assert!(body.contains("Fresh"));
    assert!(body.contains("Handled"));

    let filtered = ctx
        .client
        .get(ctx.url("/admin/messages?status=NEW"))
        .send()
        .await
        .expect("filtered request");
    let body = filtered.text().await.expect("body");
    assert!(body.contains("Fresh"));
    assert!(!body.contains("Handled"));
}

#[tokio::test]
async fn marking_a_message_read_updates_the_backend() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let id = seed_message(&ctx, "Fresh", "NEW");

    let response = ctx
        .client
        .post(ctx.url(&format!("/admin/messages/{id}/status")))
        .form(&[("status", "READ")])
        .send()
        .await
        .expect("status request");
    assert!(response.status().is_redirection());

    let records = ctx.backend.records("contacts");
    assert_eq!(records[0]["status"], "READ");
}

#[tokio::test]
async fn deleting_a_message_removes_it() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let id = seed_message(&ctx, "Gone", "NEW");

    let response = ctx
        .client
        .post(ctx.url(&format!("/admin/messages/{id}/delete")))
        .send()
        .await
        .expect("delete request");
    assert!(response.status().is_redirection());

    assert!(ctx.backend.records("contacts").is_empty());
}
