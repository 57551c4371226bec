//! Integration tests for the agency screens under `/api/v1/views`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, ADMIN_TOKEN};
use serde_json::json;
use socialdesk_store::memory::InMemoryBackend;

async fn with_reports_and_billings() -> Arc<InMemoryBackend> {
    let backend = common::seeded_backend().await;
    backend
        .seed(
            "Report",
            vec![
                json!({"id": "r1", "client_id": "c1", "period_start": "2024-01-01", "period_end": "2024-01-31", "followers_gained": 7, "engagement_rate": 3.1}),
                json!({"id": "r2", "client_id": "c2", "period_start": "2024-01-01", "period_end": "2024-01-31", "followers_gained": 50}),
            ],
        )
        .await;
    backend
        .seed(
            "Billing",
            vec![
                json!({"id": "b1", "client_id": "c1", "amount": 100, "due_date": "2020-01-05", "status": "pending"}),
                json!({"id": "b2", "client_id": "c9", "amount": 50, "due_date": "2020-02-01", "status": "paid"}),
            ],
        )
        .await;
    backend
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dashboard_counts_active_clients_and_lists_recent() {
    let app = common::build_test_app(common::seeded_backend().await);
    let response = get(app, ADMIN_TOKEN, "/api/v1/views/dashboard").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["stats"]["active_clients"], 1);
    let recent = json["data"]["recent_clients"].as_array().unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0]["id"], "c2");
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clients_view_filters_by_status_and_counts_posts() {
    let app = common::build_test_app(common::seeded_backend().await);
    let response = get(app, ADMIN_TOKEN, "/api/v1/views/clients?status=active").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 2);
    assert_eq!(json["data"]["filtered"], true);
    let rows = json["data"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["company_name"], "Padaria Sol");
    assert_eq!(rows[0]["initial"], "P");
    assert_eq!(rows[0]["post_count"], 1);
}

#[tokio::test]
async fn clients_view_search_is_case_insensitive() {
    let app = common::build_test_app(common::seeded_backend().await);
    let response = get(app, ADMIN_TOKEN, "/api/v1/views/clients?search=LUA").await;

    let json = body_json(response).await;
    let rows = json["data"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "c2");
}

#[tokio::test]
async fn clients_view_rejects_unknown_status() {
    let app = common::build_test_app(common::seeded_backend().await);
    let response = get(app, ADMIN_TOKEN, "/api/v1/views/clients?status=archived").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

#[tokio::test]
async fn calendar_places_post_on_its_day() {
    let app = common::build_test_app(common::seeded_backend().await);
    let response = get(app, ADMIN_TOKEN, "/api/v1/views/calendar?year=2024&month=3").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["month"], "2024-03");
    assert_eq!(data["previous"], "2024-02");
    assert_eq!(data["next"], "2024-04");
    assert_eq!(data["post_count"], 1);

    let days = data["days"].as_array().unwrap();
    assert_eq!(days.len(), 31);
    assert_eq!(days[14]["date"], "2024-03-15");
    assert_eq!(days[14]["posts"][0]["id"], "p1");
    assert_eq!(days[14]["posts"][0]["client_name"], "Padaria Sol");
}

#[tokio::test]
async fn calendar_other_month_and_filters_exclude_post() {
    let backend = common::seeded_backend().await;

    let app = common::build_test_app(backend.clone());
    let response = get(app, ADMIN_TOKEN, "/api/v1/views/calendar?year=2024&month=4").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["post_count"], 0);

    let app = common::build_test_app(backend);
    let response = get(
        app,
        ADMIN_TOKEN,
        "/api/v1/views/calendar?year=2024&month=3&client_id=c2",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["post_count"], 0);
}

#[tokio::test]
async fn calendar_requires_year_and_month_together() {
    let app = common::build_test_app(common::seeded_backend().await);
    let response = get(app, ADMIN_TOKEN, "/api/v1/views/calendar?year=2024").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reports_view_sums_reports_in_window() {
    let backend = with_reports_and_billings().await;

    let app = common::build_test_app(backend.clone());
    let response = get(
        app,
        ADMIN_TOKEN,
        "/api/v1/views/reports?start=2024-01-01&end=2024-01-31",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["totals"]["followers"], 57);

    let app = common::build_test_app(backend);
    let response = get(
        app,
        ADMIN_TOKEN,
        "/api/v1/views/reports?start=2024-01-01&end=2024-01-31&client_id=c1",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["totals"]["followers"], 7);
    let rows = json["data"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["client_name"], "Padaria Sol");
    assert_eq!(rows[0]["engagement"], "3.10%");
}

#[tokio::test]
async fn reports_view_all_ignores_window() {
    let app = common::build_test_app(with_reports_and_billings().await);
    let response = get(app, ADMIN_TOKEN, "/api/v1/views/reports?all=true").await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["totals"]["followers"], 57);
    assert_eq!(json["data"]["rows"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn reports_view_rejects_reversed_range() {
    let app = common::build_test_app(with_reports_and_billings().await);
    let response = get(
        app,
        ADMIN_TOKEN,
        "/api/v1/views/reports?start=2024-02-01&end=2024-01-01",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Financial
// ---------------------------------------------------------------------------

#[tokio::test]
async fn financial_view_derives_overdue() {
    let app = common::build_test_app(with_reports_and_billings().await);
    let response = get(app, ADMIN_TOKEN, "/api/v1/views/financial").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["summary"]["overdue_total"], 100.0);
    assert_eq!(data["summary"]["pending_total"], 0.0);

    let rows = data["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Latest due date first.
    assert_eq!(rows[0]["billing"]["id"], "b2");
    assert_eq!(rows[0]["client_name"], "Client not found");
    assert_eq!(rows[1]["display_status"], "overdue");
    assert_eq!(rows[1]["billing"]["status"], "pending");
}

#[tokio::test]
async fn financial_status_selector_narrows_rows_only() {
    let app = common::build_test_app(with_reports_and_billings().await);
    let response = get(app, ADMIN_TOKEN, "/api/v1/views/financial?status=overdue").await;

    let json = body_json(response).await;
    let rows = json["data"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["billing"]["id"], "b1");
    assert_eq!(json["data"]["summary"]["overdue_total"], 100.0);
}
