//! Handlers for the `/clients` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use socialdesk_core::models::client::{Client, CreateClient, UpdateClient};
use socialdesk_store::records;
use socialdesk_views::actions;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/clients
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateClient>,
) -> AppResult<impl IntoResponse> {
    let client = actions::create::<Client>(state.store.as_ref(), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// GET /api/v1/clients
///
/// Newest first unless `sort` says otherwise. `client_id` does not apply.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.list_query("-created_date");
    let clients = records::<Client>(state.store.as_ref()).list(&query).await?;
    Ok(Json(DataResponse { data: clients }))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let client = records::<Client>(state.store.as_ref()).get(&id).await?;
    Ok(Json(DataResponse { data: client }))
}

/// PUT /api/v1/clients/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateClient>,
) -> AppResult<impl IntoResponse> {
    let client = actions::update::<Client>(state.store.as_ref(), &id, &input).await?;
    Ok(Json(DataResponse { data: client }))
}

/// DELETE /api/v1/clients/{id}
///
/// Posts, reports and billings of the client are left in place; screens
/// show them under a placeholder name.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    actions::delete::<Client>(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
