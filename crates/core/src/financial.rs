//! Billing display status and financial summaries.
//!
//! Overdue is derived at read time from the stored record and the current
//! instant; nothing here mutates a billing. [`mark_paid`] builds the only
//! update that changes a stored status.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::{format_store_date, parse_calendar_date, parse_instant, MonthRef};
use crate::filter::{Criteria, Selection};
use crate::models::billing::{Billing, UpdateBilling};
use crate::status::BillingStatus;
use crate::types::{ClientId, Timestamp};

/// Display status of `billing` at `now`.
///
/// A pending billing whose due date (midnight UTC of the due day) is before
/// `now` shows as overdue. Every other billing, including one whose due
/// date does not parse, shows its stored status.
pub fn derive_status(billing: &Billing, now: Timestamp) -> BillingStatus {
    if billing.status != BillingStatus::Pending {
        return billing.status;
    }
    match billing.due_date.as_deref().and_then(parse_instant) {
        Some(due) if due < now => BillingStatus::Overdue,
        _ => BillingStatus::Pending,
    }
}

/// A billing paired with its display status.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DisplayBilling<'a> {
    pub billing: &'a Billing,
    pub display_status: BillingStatus,
}

/// Pair every billing with its display status, in source order.
pub fn with_display_status<'a, I>(billings: I, now: Timestamp) -> Vec<DisplayBilling<'a>>
where
    I: IntoIterator<Item = &'a Billing>,
{
    billings
        .into_iter()
        .map(|billing| DisplayBilling {
            billing,
            display_status: derive_status(billing, now),
        })
        .collect()
}

/// Billing selectors. Status is matched against the display status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingFilter {
    pub client: Selection<ClientId>,
    pub status: Selection<BillingStatus>,
}

impl Criteria<DisplayBilling<'_>> for BillingFilter {
    fn matches(&self, row: &DisplayBilling<'_>) -> bool {
        self.client.matches(&row.billing.client_id) && self.status.matches(&row.display_status)
    }
}

/// Headline figures of the financial screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FinancialSummary {
    /// Sum of every billing due within the month.
    pub expected_this_month: f64,
    /// Sum of paid billings due within the month.
    pub received_this_month: f64,
    /// Sum of billings currently displayed as pending.
    pub pending_total: f64,
    /// Sum of billings currently displayed as overdue.
    pub overdue_total: f64,
}

/// Summarize `rows` for `month`. Both ends of the month are included.
pub fn summarize(rows: &[DisplayBilling<'_>], month: MonthRef) -> FinancialSummary {
    rows.iter().fold(FinancialSummary::default(), |mut acc, row| {
        let amount = row.billing.amount_or_zero();
        match row.display_status {
            BillingStatus::Pending => acc.pending_total += amount,
            BillingStatus::Overdue => acc.overdue_total += amount,
            _ => {}
        }
        let due_this_month = row
            .billing
            .due_date
            .as_deref()
            .and_then(parse_calendar_date)
            .is_some_and(|d| month.contains(d));
        if due_this_month {
            acc.expected_this_month += amount;
            if row.display_status == BillingStatus::Paid {
                acc.received_this_month += amount;
            }
        }
        acc
    })
}

/// The update written when a billing is marked as paid on `today`.
pub fn mark_paid(today: NaiveDate) -> UpdateBilling {
    UpdateBilling {
        status: Some(BillingStatus::Paid),
        payment_date: Some(format_store_date(today)),
        ..Default::default()
    }
}
