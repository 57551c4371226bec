//! Handlers for the client portal under `/me`.
//!
//! Every route acts on the client record linked to the signed-in user's
//! email. A user without a linked client gets 404 `NO_LINKED_CLIENT`.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use socialdesk_core::models::client::ProfileUpdate;
use socialdesk_views::actions;
use socialdesk_views::screens::portal::{self, CalendarCriteria};

use super::uploads::read_single_file;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::{CalendarViewParams, ReportsViewParams};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewComment {
    pub text: String,
}

/// GET /api/v1/me
pub async fn current_user(auth: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse { data: auth.user }))
}

/// GET /api/v1/me/client
pub async fn linked_client(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let client = portal::resolve_client(state.store.as_ref(), &auth.user).await?;
    Ok(Json(DataResponse { data: client }))
}

/// PUT /api/v1/me/profile
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ProfileUpdate>,
) -> AppResult<impl IntoResponse> {
    let client = actions::update_profile(state.store.as_ref(), &auth.user, input).await?;
    Ok(Json(DataResponse { data: client }))
}

/// POST /api/v1/me/logo
///
/// Uploads a single multipart `file` part and sets it as the brand logo.
pub async fn upload_logo(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let file = read_single_file(&mut multipart).await?;
    let client =
        actions::upload_logo(state.store.as_ref(), state.uploader.as_ref(), &auth.user, file)
            .await?;
    Ok(Json(DataResponse { data: client }))
}

/// GET /api/v1/me/calendar?status&year&month
pub async fn calendar(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CalendarViewParams>,
) -> AppResult<impl IntoResponse> {
    let today = Utc::now().date_naive();
    let criteria = CalendarCriteria {
        month: params.month(today)?,
        status: params.status()?,
    };
    let snapshot = portal::load_calendar(state.store.as_ref(), &auth.user).await?;
    let view = portal::calendar_view(&snapshot, &criteria, today);
    // The view borrows the snapshot, so serialize before it drops.
    Ok(Json(DataResponse { data: view }).into_response())
}

/// GET /api/v1/me/reports?start&end&all
///
/// Defaults to the trailing 90 days.
pub async fn reports(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ReportsViewParams>,
) -> AppResult<impl IntoResponse> {
    let today = Utc::now().date_naive();
    let range = params.range(portal::default_range(today))?;
    let snapshot = portal::load_reports(state.store.as_ref(), &auth.user).await?;
    let view = portal::reports_view(&snapshot, range);
    Ok(Json(DataResponse { data: view }).into_response())
}

/// POST /api/v1/me/posts/{id}/comments
pub async fn add_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<NewComment>,
) -> AppResult<impl IntoResponse> {
    let post =
        actions::add_comment(state.store.as_ref(), &auth.user, &id, &input.text, Utc::now())
            .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// POST /api/v1/me/posts/{id}/approve
pub async fn approve(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = actions::approve_post(state.store.as_ref(), &auth.user, &id).await?;
    Ok(Json(DataResponse { data: post }))
}
