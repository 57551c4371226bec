//! Handlers for the `/reports` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use socialdesk_core::models::report::{CreateReport, Report, UpdateReport};
use socialdesk_store::records;
use socialdesk_views::actions;

use super::list_records;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/reports
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateReport>,
) -> AppResult<impl IntoResponse> {
    let report = actions::create::<Report>(state.store.as_ref(), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}

/// GET /api/v1/reports
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let reports: Vec<Report> = list_records(state.store.as_ref(), &params, "-period_end").await?;
    Ok(Json(DataResponse { data: reports }))
}

/// GET /api/v1/reports/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let report = records::<Report>(state.store.as_ref()).get(&id).await?;
    Ok(Json(DataResponse { data: report }))
}

/// PUT /api/v1/reports/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateReport>,
) -> AppResult<impl IntoResponse> {
    let report = actions::update::<Report>(state.store.as_ref(), &id, &input).await?;
    Ok(Json(DataResponse { data: report }))
}

/// DELETE /api/v1/reports/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    actions::delete::<Report>(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
