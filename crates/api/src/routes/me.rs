use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Client portal routes mounted at `/me`. Any signed-in user.
///
/// ```text
/// GET    /                         -> current_user
/// GET    /client                   -> linked_client
/// PUT    /profile                  -> update_profile
/// POST   /logo                     -> upload_logo     (multipart)
/// GET    /calendar                 -> calendar
/// GET    /reports                  -> reports
/// POST   /posts/{id}/comments      -> add_comment
/// POST   /posts/{id}/approve       -> approve
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(me::current_user))
        .route("/client", get(me::linked_client))
        .route("/profile", put(me::update_profile))
        .route("/logo", post(me::upload_logo))
        .route("/calendar", get(me::calendar))
        .route("/reports", get(me::reports))
        .route("/posts/{id}/comments", post(me::add_comment))
        .route("/posts/{id}/approve", post(me::approve))
}
