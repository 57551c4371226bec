//! Billing overview.
//!
//! The summary always covers every billing; the client and status
//! selectors only narrow the table rows.

use serde::Serialize;
use socialdesk_core::client_index::{ClientIndex, FINANCIAL_PLACEHOLDER};
use socialdesk_core::dates::MonthRef;
use socialdesk_core::filter::Criteria;
use socialdesk_core::financial::{summarize, with_display_status, BillingFilter, FinancialSummary};
use socialdesk_core::models::billing::Billing;
use socialdesk_core::models::client::Client;
use socialdesk_core::status::BillingStatus;
use socialdesk_core::types::Timestamp;
use socialdesk_store::{records, ListQuery, RecordStore};

use crate::error::ViewResult;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub clients: Vec<Client>,
    /// Latest due date first.
    pub billings: Vec<Billing>,
}

pub async fn load(store: &dyn RecordStore) -> ViewResult<Snapshot> {
    let client_query = ListQuery::default();
    let billing_query = ListQuery::sorted("-due_date");
    let clients = records::<Client>(store);
    let billings = records::<Billing>(store);
    let (clients, billings) = tokio::try_join!(clients.list(&client_query), billings.list(&billing_query))?;
    Ok(Snapshot { clients, billings })
}

#[derive(Debug, Serialize)]
pub struct BillingRow<'a> {
    pub billing: &'a Billing,
    /// Status to display, with overdue derived from the due date.
    pub display_status: BillingStatus,
    pub client_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct FinancialView<'a> {
    pub month: MonthRef,
    pub summary: FinancialSummary,
    pub rows: Vec<BillingRow<'a>>,
}

pub fn view<'a>(snapshot: &'a Snapshot, criteria: &BillingFilter, now: Timestamp) -> FinancialView<'a> {
    let index = ClientIndex::build(&snapshot.clients);
    let month = MonthRef::current(now);
    let displayed = with_display_status(&snapshot.billings, now);

    let rows = displayed
        .iter()
        .filter(|row| criteria.matches(*row))
        .map(|row| BillingRow {
            billing: row.billing,
            display_status: row.display_status,
            client_name: index.name_or(&row.billing.client_id, FINANCIAL_PLACEHOLDER),
        })
        .collect();

    FinancialView {
        month,
        summary: summarize(&displayed, month),
        rows,
    }
}
