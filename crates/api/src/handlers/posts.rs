//! Handlers for the `/posts` resource.
//!
//! Agency staff manage posts directly. The status endpoint is also open to
//! client users for their own posts, within the role's allowed statuses.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use socialdesk_core::media::MediaSlot;
use socialdesk_core::models::post::{CreatePost, Post, UpdatePost};
use socialdesk_core::status::PostStatus;
use socialdesk_store::records;
use socialdesk_views::actions;

use super::list_records;
use super::uploads::read_files;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: PostStatus,
}

/// POST /api/v1/posts
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePost>,
) -> AppResult<impl IntoResponse> {
    let post = actions::create::<Post>(state.store.as_ref(), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// GET /api/v1/posts
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let posts: Vec<Post> = list_records(state.store.as_ref(), &params, "-scheduled_date").await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/posts/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = records::<Post>(state.store.as_ref()).get(&id).await?;
    Ok(Json(DataResponse { data: post }))
}

/// PUT /api/v1/posts/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdatePost>,
) -> AppResult<impl IntoResponse> {
    let post = actions::update::<Post>(state.store.as_ref(), &id, &input).await?;
    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    actions::delete::<Post>(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/posts/{id}/status
pub async fn change_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<StatusChange>,
) -> AppResult<impl IntoResponse> {
    let post =
        actions::change_post_status(state.store.as_ref(), &auth.user, &id, input.status).await?;
    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/posts/{id}/media
///
/// Uploads every `file`/`files` part and appends it to the post's media.
/// Parts beyond the media cap are skipped.
pub async fn attach_media(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let files = read_files(&mut multipart).await?;
    if files.is_empty() {
        return Err(AppError::BadRequest("At least one file part is required".into()));
    }
    let post =
        actions::attach_media(state.store.as_ref(), state.uploader.as_ref(), &id, files).await?;
    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/v1/posts/{id}/media/{slot}
///
/// `slot` is `primary` or the zero-based index of an extra attachment.
pub async fn remove_media(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((id, slot)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let slot = parse_slot(&slot)?;
    let post = actions::remove_media(state.store.as_ref(), &id, slot).await?;
    Ok(Json(DataResponse { data: post }))
}

fn parse_slot(raw: &str) -> AppResult<MediaSlot> {
    if raw.eq_ignore_ascii_case("primary") {
        return Ok(MediaSlot::Primary);
    }
    raw.parse::<usize>().map(MediaSlot::Extra).map_err(|_| {
        AppError::BadRequest(format!(
            "Invalid media slot '{raw}'. Expected 'primary' or an index"
        ))
    })
}
