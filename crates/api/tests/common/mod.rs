#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use socialdesk_api::config::{ServerConfig, StoreBackend};
use socialdesk_api::router::build_app_router;
use socialdesk_api::state::AppState;
use socialdesk_core::models::user::CurrentUser;
use socialdesk_core::roles::Role;
use socialdesk_store::memory::InMemoryBackend;
use tower::ServiceExt;

/// Token of the seeded agency admin.
pub const ADMIN_TOKEN: &str = "admin-token";
/// Token of the seeded client user linked to client `c1`.
pub const CLIENT_TOKEN: &str = "client-token";
/// Token of a signed-in user with no linked client.
pub const STRANGER_TOKEN: &str = "stranger-token";

/// Body limit of the test server.
pub const TEST_UPLOAD_LIMIT: usize = 64 * 1024;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        max_upload_bytes: TEST_UPLOAD_LIMIT,
    }
}

/// An in-memory backend with three users, two clients and one post.
///
/// - `ana@sol.com` (client user) owns client `c1` "Padaria Sol".
/// - Client `c2` "Oficina Lua" belongs to `leo@lua.com`.
/// - Post `p1` of `c1` is in production.
pub async fn seeded_backend() -> Arc<InMemoryBackend> {
    let backend = Arc::new(InMemoryBackend::new());
    backend
        .add_user(
            ADMIN_TOKEN,
            CurrentUser {
                email: "staff@agency.com".into(),
                full_name: Some("Agency Staff".into()),
                role: Role::Admin,
            },
        )
        .await;
    backend
        .add_user(
            CLIENT_TOKEN,
            CurrentUser {
                email: "ana@sol.com".into(),
                full_name: Some("Ana".into()),
                role: Role::User,
            },
        )
        .await;
    backend
        .add_user(
            STRANGER_TOKEN,
            CurrentUser {
                email: "who@nowhere.com".into(),
                full_name: None,
                role: Role::User,
            },
        )
        .await;
    backend
        .seed(
            "Client",
            vec![
                json!({"id": "c1", "company_name": "Padaria Sol", "user_email": "ana@sol.com", "status": "active", "created_date": "2024-01-10T12:00:00Z"}),
                json!({"id": "c2", "company_name": "Oficina Lua", "user_email": "leo@lua.com", "status": "inactive", "created_date": "2024-02-10T12:00:00Z"}),
            ],
        )
        .await;
    backend
        .seed(
            "Post",
            vec![json!({
                "id": "p1", "client_id": "c1", "title": "Launch",
                "scheduled_date": "2024-03-15", "status": "production"
            })],
        )
        .await;
    backend
}

/// Build the full application router over `backend`.
///
/// Uses [`build_app_router`] so tests exercise the same middleware stack
/// (CORS, request ID, timeout, tracing, panic recovery) as production.
pub fn build_test_app(backend: Arc<InMemoryBackend>) -> Router {
    let config = test_config();
    let state = AppState::with_memory(backend, config.clone());
    build_app_router(state, &config)
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

/// Send a GET request without credentials.
pub async fn get_anonymous(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

/// Send a GET request as the user behind `token`.
pub async fn get(app: Router, token: &str, uri: &str) -> Response<Body> {
    send(
        app,
        request(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn send_json(app: Router, method: Method, token: &str, uri: &str, body: Value) -> Response<Body> {
    send(
        app,
        request(method, uri, Some(token))
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
    )
    .await
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, token: &str, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, token, uri, body).await
}

/// Send a PUT request with a JSON body.
pub async fn put_json(app: Router, token: &str, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, token, uri, body).await
}

/// Send a PATCH request with a JSON body.
pub async fn patch_json(app: Router, token: &str, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PATCH, token, uri, body).await
}

/// Send a POST request without a body.
pub async fn post_empty(app: Router, token: &str, uri: &str) -> Response<Body> {
    send(
        app,
        request(Method::POST, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// Send a DELETE request.
pub async fn delete(app: Router, token: &str, uri: &str) -> Response<Body> {
    send(
        app,
        request(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// A file part of a multipart upload.
pub struct Part<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

/// Send a `multipart/form-data` POST with the given file parts.
pub async fn post_multipart(app: Router, token: &str, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    const BOUNDARY: &str = "socialdesk-test-boundary";
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.field, part.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
        body.extend_from_slice(part.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    send(
        app,
        request(Method::POST, uri, Some(token))
            .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
