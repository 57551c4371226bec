//! Handlers for the agency screens under `/views`.
//!
//! Each request loads a fresh snapshot and derives the screen from it.
//! Dates are evaluated in UTC.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use socialdesk_core::dates::DateRange;
use socialdesk_views::screens;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{CalendarViewParams, ClientsViewParams, FinancialViewParams, ReportsViewParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/views/dashboard
pub async fn dashboard(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let snapshot = screens::dashboard::load(state.store.as_ref()).await?;
    let view = screens::dashboard::view(&snapshot, Utc::now().date_naive());
    // The view borrows the snapshot, so serialize before it drops.
    Ok(Json(DataResponse { data: view }).into_response())
}

/// GET /api/v1/views/clients?search&status
pub async fn clients(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ClientsViewParams>,
) -> AppResult<impl IntoResponse> {
    let criteria = params.criteria()?;
    let snapshot = screens::clients::load(state.store.as_ref()).await?;
    let view = screens::clients::view(&snapshot, &criteria);
    Ok(Json(DataResponse { data: view }).into_response())
}

/// GET /api/v1/views/calendar?client_id&status&year&month
pub async fn calendar(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<CalendarViewParams>,
) -> AppResult<impl IntoResponse> {
    let today = Utc::now().date_naive();
    let criteria = screens::calendar::Criteria {
        month: params.month(today)?,
        filter: params.post_filter()?,
    };
    let snapshot = screens::calendar::load(state.store.as_ref()).await?;
    let view = screens::calendar::view(&snapshot, &criteria, today);
    Ok(Json(DataResponse { data: view }).into_response())
}

/// GET /api/v1/views/reports?client_id&start&end&all
///
/// Defaults to the trailing 30 days.
pub async fn reports(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ReportsViewParams>,
) -> AppResult<impl IntoResponse> {
    let window = DateRange::trailing_days(
        Utc::now().date_naive(),
        screens::reports::DEFAULT_WINDOW_DAYS,
    );
    let criteria = params.report_filter(window)?;
    let snapshot = screens::reports::load(state.store.as_ref()).await?;
    let view = screens::reports::view(&snapshot, &criteria);
    Ok(Json(DataResponse { data: view }).into_response())
}

/// GET /api/v1/views/financial?client_id&status
pub async fn financial(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<FinancialViewParams>,
) -> AppResult<impl IntoResponse> {
    let criteria = params.criteria()?;
    let snapshot = screens::financial::load(state.store.as_ref()).await?;
    let view = screens::financial::view(&snapshot, &criteria, Utc::now());
    Ok(Json(DataResponse { data: view }).into_response())
}
