use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use socialdesk_core::error::CoreError;
use socialdesk_store::StoreError;
use socialdesk_views::ViewError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain, store and view errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `socialdesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A record store, identity or upload failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A failure while loading a screen or running a write action.
    #[error(transparent)]
    View(#[from] ViewError),

    /// A malformed or oversized multipart body.
    #[error(transparent)]
    Multipart(#[from] MultipartError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type Classified = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Store(store) => classify_store_error(store),
            AppError::View(view) => classify_view_error(view),
            AppError::Multipart(err) => classify_multipart_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(err: &CoreError) -> Classified {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - `NotFound` maps to 404 and `Validation` to 400.
/// - A rejected token maps to 401.
/// - Backend transport, status and decode failures map to 502.
fn classify_store_error(err: &StoreError) -> Classified {
    match err {
        StoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        StoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        StoreError::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Invalid or expired token".to_string(),
        ),
        StoreError::Request(_) | StoreError::Api { .. } | StoreError::Decode(_) => {
            tracing::error!(error = %err, "Backend error");
            (
                StatusCode::BAD_GATEWAY,
                "BACKEND_ERROR",
                "The backend is unavailable or returned an invalid response".to_string(),
            )
        }
        StoreError::Config(msg) => {
            tracing::error!(error = %msg, "Backend misconfigured");
            internal()
        }
    }
}

fn classify_multipart_error(err: &MultipartError) -> Classified {
    let status = err.status();
    let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
        "PAYLOAD_TOO_LARGE"
    } else {
        "BAD_REQUEST"
    };
    (status, code, err.body_text())
}

fn classify_view_error(err: &ViewError) -> Classified {
    match err {
        ViewError::Store(store) => classify_store_error(store),
        ViewError::Core(core) => classify_core_error(core),
        ViewError::NoLinkedClient { email } => (
            StatusCode::NOT_FOUND,
            "NO_LINKED_CLIENT",
            format!("No client is linked to {email}"),
        ),
        ViewError::Cancelled => {
            tracing::warn!("Load cancelled before completion");
            internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn store_errors_map_to_http_statuses() {
        let not_found = StoreError::NotFound {
            entity: "Post",
            id: "p1".into(),
        };
        assert_eq!(status_of(not_found.into()), StatusCode::NOT_FOUND);
        assert_eq!(status_of(StoreError::Unauthorized.into()), StatusCode::UNAUTHORIZED);
        let upstream = StoreError::Api {
            status: 503,
            body: "down".into(),
        };
        assert_eq!(status_of(upstream.into()), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn view_errors_unwrap_to_their_source() {
        let forbidden = ViewError::Core(CoreError::Forbidden("no".into()));
        assert_eq!(status_of(forbidden.into()), StatusCode::FORBIDDEN);
        let unlinked = ViewError::NoLinkedClient {
            email: "x@y.com".into(),
        };
        assert_eq!(status_of(unlinked.into()), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(ViewError::Cancelled.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
