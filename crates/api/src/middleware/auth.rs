//! Bearer-token authentication extractor for Axum handlers.
//!
//! Tokens are opaque to this server. They are handed to the identity
//! provider, which answers with the signed-in user or rejects them.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use socialdesk_core::error::CoreError;
use socialdesk_core::models::user::CurrentUser;
use socialdesk_store::StoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the `Authorization: Bearer <token>` header.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(email = %auth.user.email, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: CurrentUser,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

        let user = state
            .identity
            .current_user(token)
            .await
            .map_err(|err| match err {
                StoreError::Unauthorized => {
                    AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
                }
                other => AppError::Store(other),
            })?;

        Ok(AuthUser { user })
    }
}
