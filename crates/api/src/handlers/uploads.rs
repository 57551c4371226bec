//! Handlers for file uploads.
//!
//! Uploaded bytes are forwarded to the upload service as-is; only the
//! public URL it returns is kept.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use socialdesk_store::UploadFile;
use socialdesk_views::actions;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field names accepted as file parts.
const FILE_FIELDS: &[&str] = &["file", "files"];

#[derive(Debug, Serialize)]
pub struct UploadedFile {
    pub file_url: String,
}

/// Read every file part of a multipart body, in order.
pub(crate) async fn read_files(multipart: &mut Multipart) -> AppResult<Vec<UploadFile>> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if !field.name().is_some_and(|name| FILE_FIELDS.contains(&name)) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await?;
        files.push(UploadFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Ok(files)
}

/// Read exactly one file part.
pub(crate) async fn read_single_file(multipart: &mut Multipart) -> AppResult<UploadFile> {
    read_files(multipart)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::BadRequest("Multipart field 'file' is required".into()))
}

/// POST /api/v1/uploads
///
/// Accepts a single multipart `file` part and returns its public URL.
pub async fn upload(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let file = read_single_file(&mut multipart).await?;
    let size = file.bytes.len();
    let file_url = actions::upload_file(state.uploader.as_ref(), file).await?;
    tracing::info!(user = %auth.user.email, size, %file_url, "File uploaded");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadedFile { file_url },
        }),
    ))
}
