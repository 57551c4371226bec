use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// PATCH  /{id}/status           -> change_status   (any signed-in user)
/// POST   /{id}/media            -> attach_media    (multipart)
/// DELETE /{id}/media/{slot}     -> remove_media
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list).post(posts::create))
        .route(
            "/{id}",
            get(posts::get_by_id)
                .put(posts::update)
                .delete(posts::delete),
        )
        .route("/{id}/status", patch(posts::change_status))
        .route("/{id}/media", post(posts::attach_media))
        .route("/{id}/media/{slot}", delete(posts::remove_media))
}
