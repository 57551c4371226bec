//! Handlers for the `/billings` resource.
//!
//! Records are returned with their stored status. The derived overdue
//! status only appears in the financial view.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use socialdesk_core::models::billing::{Billing, CreateBilling, UpdateBilling};
use socialdesk_store::records;
use socialdesk_views::actions;

use super::list_records;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/billings
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBilling>,
) -> AppResult<impl IntoResponse> {
    let billing = actions::create::<Billing>(state.store.as_ref(), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: billing })))
}

/// GET /api/v1/billings
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let billings: Vec<Billing> = list_records(state.store.as_ref(), &params, "-due_date").await?;
    Ok(Json(DataResponse { data: billings }))
}

/// GET /api/v1/billings/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let billing = records::<Billing>(state.store.as_ref()).get(&id).await?;
    Ok(Json(DataResponse { data: billing }))
}

/// PUT /api/v1/billings/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateBilling>,
) -> AppResult<impl IntoResponse> {
    let billing = actions::update::<Billing>(state.store.as_ref(), &id, &input).await?;
    Ok(Json(DataResponse { data: billing }))
}

/// DELETE /api/v1/billings/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    actions::delete::<Billing>(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/billings/{id}/mark-paid
///
/// Sets status `paid` and today's date (UTC) as the payment date.
pub async fn mark_paid(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let today = Utc::now().date_naive();
    let billing = actions::mark_billing_paid(state.store.as_ref(), &id, today).await?;
    Ok(Json(DataResponse { data: billing }))
}
