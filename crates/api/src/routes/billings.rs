use axum::routing::{get, post};
use axum::Router;

use crate::handlers::billings;
use crate::state::AppState;

/// Routes mounted at `/billings`. Agency only.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// POST   /{id}/mark-paid   -> mark_paid
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(billings::list).post(billings::create))
        .route(
            "/{id}",
            get(billings::get_by_id)
                .put(billings::update)
                .delete(billings::delete),
        )
        .route("/{id}/mark-paid", post(billings::mark_paid))
}
