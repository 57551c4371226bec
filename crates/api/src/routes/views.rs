use axum::routing::get;
use axum::Router;

use crate::handlers::views;
use crate::state::AppState;

/// Agency screen routes mounted at `/views`.
///
/// ```text
/// GET    /dashboard        -> dashboard
/// GET    /clients          -> clients     ?search&status
/// GET    /calendar         -> calendar    ?client_id&status&year&month
/// GET    /reports          -> reports     ?client_id&start&end&all
/// GET    /financial        -> financial   ?client_id&status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(views::dashboard))
        .route("/clients", get(views::clients))
        .route("/calendar", get(views::calendar))
        .route("/reports", get(views::reports))
        .route("/financial", get(views::financial))
}
