//! End-to-end test harness for the portfolio site.
//!
//! Spins up two in-process servers on ephemeral ports: a mock of the
//! managed backend (data, storage, and identity facades speaking the real
//! wire protocol) and the site itself, pointed at the mock. Tests then
//! drive the site over HTTP with a cookie-holding `reqwest` client,
//! exercising the full path from form submission to backend write.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Test harness: panicking on broken plumbing is the point.
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;
use reqwest::redirect::Policy;
use secrecy::SecretString;
use serde_json::{Value, json};
use uuid::Uuid;

use portfolio_site::app::build_router;
use portfolio_site::config::{BackendConfig, SiteConfig};
use portfolio_site::state::AppState;

/// API key the mock backend accepts.
pub const API_KEY: &str = "test-public-api-key";

/// Owner credentials the mock identity facade accepts.
pub const OWNER_EMAIL: &str = "dan@okoye.dev";
pub const OWNER_PASSWORD: &str = "rolling-thunder-62-chairs";
pub const OWNER_NAME: &str = "Daniel";

/// An object stored by the mock storage facade.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub content_type: String,
    pub size: usize,
}

#[derive(Default)]
struct MockState {
    /// Records per model, as raw JSON objects.
    records: HashMap<String, Vec<Value>>,
    /// Bearer tokens that are currently valid.
    tokens: HashSet<String>,
    /// Uploaded objects by storage key.
    uploads: HashMap<String, StoredObject>,
    /// Models whose list endpoint answers 500.
    failing_list_models: HashSet<String>,
    /// When set, every storage PUT answers 500.
    failing_uploads: bool,
}

/// In-process mock of the managed backend.
#[derive(Clone)]
pub struct MockBackend {
    /// Base URL of the running mock, e.g. `http://127.0.0.1:49523`.
    pub url: String,
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// Start the mock backend on an ephemeral port.
    pub async fn spawn() -> Self {
        let state = Arc::new(Mutex::new(MockState::default()));

        let router = Router::new()
            .route("/data/{model}", get(list_records).post(create_record))
            .route(
                "/data/{model}/{id}",
                axum::routing::patch(update_record).delete(delete_record),
            )
            .route("/storage/{*key}", put(put_object))
            .route("/identity/sign-in", post(sign_in))
            .route("/identity/sign-out", post(sign_out))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("mock backend");
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    /// All records currently stored for a model.
    pub fn records(&self, model: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .records
            .get(model)
            .cloned()
            .unwrap_or_default()
    }

    /// Seed a record directly, assigning an id and timestamps the way the
    /// real backend would. Returns the stored record.
    pub fn insert_record(&self, model: &str, mut record: Value) -> Value {
        let now = Utc::now().to_rfc3339();
        let obj = record.as_object_mut().expect("record must be an object");
        obj.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
        obj.entry("createdAt").or_insert_with(|| json!(now));
        obj.insert("updatedAt".to_string(), json!(now));

        self.state
            .lock()
            .unwrap()
            .records
            .entry(model.to_string())
            .or_default()
            .push(record.clone());
        record
    }

    /// Keys of every object uploaded to the storage facade.
    pub fn upload_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.state.lock().unwrap().uploads.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// The stored object at a key, if any.
    pub fn uploaded(&self, key: &str) -> Option<StoredObject> {
        self.state.lock().unwrap().uploads.get(key).cloned()
    }

    /// How many bearer tokens are currently valid.
    pub fn active_token_count(&self) -> usize {
        self.state.lock().unwrap().tokens.len()
    }

    /// Make the list endpoint for a model answer 500 from now on.
    pub fn fail_lists_for(&self, model: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_list_models
            .insert(model.to_string());
    }

    /// Make every storage PUT answer 500 from now on.
    pub fn fail_uploads(&self) {
        self.state.lock().unwrap().failing_uploads = true;
    }
}

type SharedState = Arc<Mutex<MockState>>;

fn api_key_ok(headers: &HeaderMap) -> bool {
    headers
        .get("X-Api-Key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == API_KEY)
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(ToString::to_string)
}

fn authorized(state: &SharedState, headers: &HeaderMap) -> bool {
    bearer(headers).is_some_and(|token| state.lock().unwrap().tokens.contains(&token))
}

fn error_body(message: &str) -> Value {
    json!({ "message": message })
}

/// Models anyone may read. Contact messages are owner-only.
fn publicly_readable(model: &str) -> bool {
    model != "contacts"
}

/// Models anyone may create. Only contact messages accept public writes.
fn publicly_creatable(model: &str) -> bool {
    model == "contacts"
}

async fn list_records(
    State(state): State<SharedState>,
    Path(model): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !api_key_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, axum::Json(error_body("bad api key"))).into_response();
    }
    if !publicly_readable(&model) && !authorized(&state, &headers) {
        return (StatusCode::FORBIDDEN, axum::Json(error_body("owner only"))).into_response();
    }
    if state.lock().unwrap().failing_list_models.contains(&model) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(error_body("list unavailable")),
        )
            .into_response();
    }

    let items: Vec<Value> = state
        .lock()
        .unwrap()
        .records
        .get(&model)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter(|record| {
            filters.iter().all(|(field, value)| {
                record.get(field).and_then(Value::as_str) == Some(value.as_str())
            })
        })
        .collect();

    axum::Json(json!({ "items": items })).into_response()
}

async fn create_record(
    State(state): State<SharedState>,
    Path(model): Path<String>,
    headers: HeaderMap,
    axum::Json(mut body): axum::Json<Value>,
) -> impl IntoResponse {
    if !api_key_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, axum::Json(error_body("bad api key"))).into_response();
    }
    if !publicly_creatable(&model) && !authorized(&state, &headers) {
        return (StatusCode::FORBIDDEN, axum::Json(error_body("owner only"))).into_response();
    }

    let now = Utc::now().to_rfc3339();
    let Some(obj) = body.as_object_mut() else {
        return (StatusCode::BAD_REQUEST, axum::Json(error_body("not an object")))
            .into_response();
    };
    obj.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
    obj.entry("createdAt").or_insert_with(|| json!(now.clone()));
    obj.insert("updatedAt".to_string(), json!(now));

    state
        .lock()
        .unwrap()
        .records
        .entry(model)
        .or_default()
        .push(body.clone());

    (StatusCode::CREATED, axum::Json(body)).into_response()
}

async fn update_record(
    State(state): State<SharedState>,
    Path((model, id)): Path<(String, String)>,
    headers: HeaderMap,
    axum::Json(patch): axum::Json<Value>,
) -> impl IntoResponse {
    if !api_key_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, axum::Json(error_body("bad api key"))).into_response();
    }
    if !authorized(&state, &headers) {
        return (StatusCode::FORBIDDEN, axum::Json(error_body("owner only"))).into_response();
    }

    let mut guard = state.lock().unwrap();
    let Some(record) = guard
        .records
        .get_mut(&model)
        .and_then(|records| {
            records
                .iter_mut()
                .find(|r| r.get("id").and_then(Value::as_str) == Some(id.as_str()))
        })
    else {
        return (StatusCode::NOT_FOUND, axum::Json(error_body("no such record")))
            .into_response();
    };

    if let (Some(target), Some(fields)) = (record.as_object_mut(), patch.as_object()) {
        for (field, value) in fields {
            target.insert(field.clone(), value.clone());
        }
        target.insert("updatedAt".to_string(), json!(Utc::now().to_rfc3339()));
    }

    axum::Json(record.clone()).into_response()
}

async fn delete_record(
    State(state): State<SharedState>,
    Path((model, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !api_key_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, axum::Json(error_body("bad api key"))).into_response();
    }
    if !authorized(&state, &headers) {
        return (StatusCode::FORBIDDEN, axum::Json(error_body("owner only"))).into_response();
    }

    let mut guard = state.lock().unwrap();
    let Some(records) = guard.records.get_mut(&model) else {
        return (StatusCode::NOT_FOUND, axum::Json(error_body("no such record")))
            .into_response();
    };
    let before = records.len();
    records.retain(|r| r.get("id").and_then(Value::as_str) != Some(id.as_str()));
    if records.len() == before {
        return (StatusCode::NOT_FOUND, axum::Json(error_body("no such record")))
            .into_response();
    }

    StatusCode::NO_CONTENT.into_response()
}

async fn put_object(
    State(state): State<SharedState>,
    Path(key): Path<String>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> impl IntoResponse {
    if !api_key_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, axum::Json(error_body("bad api key"))).into_response();
    }
    if !authorized(&state, &headers) {
        return (StatusCode::FORBIDDEN, axum::Json(error_body("owner only"))).into_response();
    }
    if state.lock().unwrap().failing_uploads {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(error_body("storage unavailable")),
        )
            .into_response();
    }

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    state.lock().unwrap().uploads.insert(
        key,
        StoredObject {
            content_type,
            size: body.len(),
        },
    );

    StatusCode::OK.into_response()
}

async fn sign_in(
    State(state): State<SharedState>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> impl IntoResponse {
    if !api_key_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, axum::Json(error_body("bad api key"))).into_response();
    }

    let email = body.get("email").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);
    if email != Some(OWNER_EMAIL) || password != Some(OWNER_PASSWORD) {
        return (
            StatusCode::UNAUTHORIZED,
            axum::Json(error_body("invalid credentials")),
        )
            .into_response();
    }

    let token = Uuid::new_v4().to_string();
    state.lock().unwrap().tokens.insert(token.clone());

    axum::Json(json!({ "accessToken": token, "displayName": OWNER_NAME })).into_response()
}

async fn sign_out(State(state): State<SharedState>, headers: HeaderMap) -> impl IntoResponse {
    if !api_key_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, axum::Json(error_body("bad api key"))).into_response();
    }
    let Some(token) = bearer(&headers) else {
        return (StatusCode::UNAUTHORIZED, axum::Json(error_body("no token"))).into_response();
    };

    // Signing out an already-invalid token is not an error.
    state.lock().unwrap().tokens.remove(&token);
    StatusCode::OK.into_response()
}

/// A running site wired to a mock backend, plus a client to drive it.
pub struct TestContext {
    /// Cookie-holding client. Redirects are NOT followed so tests can
    /// assert on them.
    pub client: reqwest::Client,
    /// Base URL of the running site.
    pub site_url: String,
    /// Handle to the mock backend for seeding and assertions.
    pub backend: MockBackend,
}

impl TestContext {
    /// Start a mock backend and a site instance pointed at it.
    pub async fn new() -> Self {
        let backend = MockBackend::spawn().await;

        let config = SiteConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://127.0.0.1".to_string(),
            session_secret: SecretString::from("jK9mPq3vXz7wLbN2fRt8dYh4cGu6eWa1"),
            backend: BackendConfig {
                endpoint: backend.url.clone(),
                api_key: SecretString::from(API_KEY),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let app = build_router(AppState::new(config));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind site");
        let addr = listener.local_addr().expect("site addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("site server");
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("build client");

        Self {
            client,
            site_url: format!("http://{addr}"),
            backend,
        }
    }

    /// Absolute URL for a site path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.site_url)
    }

    /// Log in as the owner; panics unless the site redirects to the
    /// dashboard.
    pub async fn login(&self) {
        let response = self
            .client
            .post(self.url("/admin/login"))
            .form(&[("email", OWNER_EMAIL), ("password", OWNER_PASSWORD)])
            .send()
            .await
            .expect("login request");

        assert!(
            response.status().is_redirection(),
            "login should redirect, got {}",
            response.status()
        );
        assert_eq!(redirect_target(&response), "/admin");
    }
}

/// The Location header of a redirect response.
pub fn redirect_target(response: &reqwest::Response) -> String {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
