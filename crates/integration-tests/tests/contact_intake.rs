//! Public contact form intake.

use reqwest::StatusCode;

use portfolio_integration_tests::{TestContext, redirect_target};

#[tokio::test]
async fn submission_creates_a_new_message() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(ctx.url("/contact"))
        .form(&[
            ("name", "Visitor"),
            ("email", "visitor@example.com"),
            ("message", "I'd like a website."),
        ])
        .send()
        .await
        .expect("submit request");

    assert!(response.status().is_redirection());
    assert_eq!(redirect_target(&response), "/contact?sent=1");

    let records = ctx.backend.records("contacts");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Visitor");
    assert_eq!(records[0]["email"], "visitor@example.com");
    assert_eq!(records[0]["status"], "NEW");
}

#[tokio::test]
async fn repeated_identical_submissions_create_separate_messages() {
    let ctx = TestContext::new().await;

    for _ in 0..2 {
        let response = ctx
            .client
            .post(ctx.url("/contact"))
            .form(&[
                ("name", "Visitor"),
                ("email", "visitor@example.com"),
                ("message", "Same message twice."),
            ])
            .send()
            .await
            .expect("submit request");
        assert!(response.status().is_redirection());
    }

    let records = ctx.backend.records("contacts");
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r["status"] == "NEW"));
    assert_ne!(records[0]["id"], records[1]["id"]);
}

#[tokio::test]
async fn invalid_email_keeps_the_draft_and_writes_nothing() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(ctx.url("/contact"))
        .form(&[
            ("name", "Visitor"),
            ("email", "not-an-email"),
            ("message", "Hello there"),
        ])
        .send()
        .await
        .expect("submit request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("body");
    assert!(body.contains("valid email"));
    // The draft survives the failed submit
    assert!(body.contains("Hello there"));
    assert!(body.contains("not-an-email"));

    assert!(ctx.backend.records("contacts").is_empty());
}

#[tokio::test]
async fn blank_fields_are_rejected() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(ctx.url("/contact"))
        .form(&[
            ("name", "  "),
            ("email", "visitor@example.com"),
            ("message", "Hi"),
        ])
        .send()
        .await
        .expect("submit request");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(ctx.backend.records("contacts").is_empty());
}
