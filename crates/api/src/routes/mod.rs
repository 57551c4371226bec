pub mod billings;
pub mod clients;
pub mod health;
pub mod me;
pub mod posts;
pub mod reports;
pub mod views;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /me                                 client portal (any signed-in user)
///     /client, /profile, /logo
///     /calendar, /reports
///     /posts/{id}/comments, /posts/{id}/approve
///
/// /clients[/{id}]                     agency CRUD
/// /posts[/{id}]                       agency CRUD
///     /{id}/status                    status change (role-checked)
///     /{id}/media[/{slot}]            attach / remove media
/// /reports[/{id}]                     agency CRUD
/// /billings[/{id}]                    agency CRUD
///     /{id}/mark-paid
///
/// /uploads                            single file upload
///
/// /views                              agency screens
///     /dashboard, /clients, /calendar, /reports, /financial
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/me", me::router())
        .nest("/clients", clients::router())
        .nest("/posts", posts::router())
        .nest("/reports", reports::router())
        .nest("/billings", billings::router())
        .route("/uploads", post(handlers::uploads::upload))
        .nest("/views", views::router())
}
