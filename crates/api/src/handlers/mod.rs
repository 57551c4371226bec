//! HTTP request handlers, one module per resource.

pub mod billings;
pub mod clients;
pub mod me;
pub mod posts;
pub mod reports;
pub mod uploads;
pub mod views;

use socialdesk_store::{records, Entity, RecordStore};

use crate::error::AppResult;
use crate::query::ListParams;

/// List records of `E`, narrowed to one client when `client_id` is given.
async fn list_records<E: Entity>(
    store: &dyn RecordStore,
    params: &ListParams,
    default_sort: &str,
) -> AppResult<Vec<E>> {
    let query = params.list_query(default_sort);
    let rows = match params.client_filter() {
        Some(filter) => records::<E>(store).filter(&filter, &query).await?,
        None => records::<E>(store).list(&query).await?,
    };
    Ok(rows)
}
