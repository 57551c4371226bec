use std::time::Duration;

use assert_matches::assert_matches;
use serde_json::json;
use socialdesk_core::models::post::{Post, UpdatePost};
use socialdesk_core::roles::Role;
use socialdesk_core::status::PostStatus;
use socialdesk_store::http::{BackendConfig, HttpBackend};
use socialdesk_store::{
    records, FileUploader, Filter, IdentityProvider, ListQuery, RecordStore, StoreError,
    UploadFile,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APP: &str = "app-1";

fn backend(server: &MockServer) -> HttpBackend {
    HttpBackend::new(BackendConfig {
        base_url: server.uri(),
        app_id: APP.into(),
        api_key: Some("secret".into()),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn entity_path(entity: &str) -> String {
    format!("/api/apps/{APP}/entities/{entity}")
}

#[tokio::test]
async fn list_sends_sort_limit_and_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(entity_path("Post")))
        .and(query_param("sort", "-scheduled_date"))
        .and(query_param("limit", "100"))
        .and(header("api_key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "p1", "client_id": "c1", "status": "posted"},
            {"id": "p2", "client_id": "c2"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = backend(&server);
    let posts = records::<Post>(&store)
        .list(&ListQuery::sorted("-scheduled_date").limit(100))
        .await
        .unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].status, PostStatus::Posted);
    assert_eq!(posts[1].status, PostStatus::Idea);
}

#[tokio::test]
async fn filter_sends_json_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(entity_path("Client")))
        .and(query_param("q", r#"{"user_email":"ana@sol.com"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = backend(&server);
    let rows = store
        .filter(
            "Client",
            &Filter::new().field_eq("user_email", "ana@sol.com"),
            &ListQuery::default(),
        )
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn missing_record_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/zz", entity_path("Post"))))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such record"))
        .mount(&server)
        .await;

    let err = backend(&server).get("Post", "zz").await.unwrap_err();
    assert_matches!(err, StoreError::NotFound { entity: "Post", ref id } if id == "zz");
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(entity_path("Billing")))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = backend(&server)
        .list("Billing", &ListQuery::default())
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Api { status: 503, ref body } if body == "maintenance");
}

#[tokio::test]
async fn update_sends_partial_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("{}/p1", entity_path("Post"))))
        .and(body_json(json!({"status": "approved"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1", "client_id": "c1", "status": "approved"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = backend(&server);
    let post = records::<Post>(&store)
        .update("p1", &UpdatePost::status(PostStatus::Approved))
        .await
        .unwrap();
    assert_eq!(post.status, PostStatus::Approved);
}

#[tokio::test]
async fn current_user_uses_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/me", entity_path("User"))))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "admin@agency.com", "full_name": "Agency Admin", "role": "admin"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/me", entity_path("User"))))
        .and(header("authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = backend(&server);
    let user = store.current_user("tok-1").await.unwrap();
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.display_name(), "Agency Admin");

    assert_matches!(store.current_user("expired").await, Err(StoreError::Unauthorized));
}

#[tokio::test]
async fn upload_returns_file_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/api/apps/{APP}/integrations/Core/UploadFile")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"file_url": "https://cdn.example.com/a.png"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let url = backend(&server)
        .upload(UploadFile {
            file_name: "a.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0x89, 0x50],
        })
        .await
        .unwrap();
    assert_eq!(url, "https://cdn.example.com/a.png");
}
