//! Agency reports: totals, trend charts and the report history.

use chrono::NaiveDate;
use serde::Serialize;
use socialdesk_core::client_index::{ClientIndex, REPORTS_PLACEHOLDER};
use socialdesk_core::dates::DateRange;
use socialdesk_core::filter::{filter_by, ReportFilter, Selection};
use socialdesk_core::metrics::{chart_series, has_trend, sum_metrics, ChartPoint, MetricTotals};
use socialdesk_core::models::client::Client;
use socialdesk_core::models::report::Report;
use socialdesk_store::{records, ListQuery, RecordStore};

use super::ReportRow;
use crate::error::ViewResult;

/// Default reporting window of the agency screen, in days.
pub const DEFAULT_WINDOW_DAYS: u64 = 30;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub clients: Vec<Client>,
    /// Latest period end first.
    pub reports: Vec<Report>,
}

pub async fn load(store: &dyn RecordStore) -> ViewResult<Snapshot> {
    let client_query = ListQuery::default();
    let report_query = ListQuery::sorted("-period_end");
    let clients = records::<Client>(store);
    let reports = records::<Report>(store);
    let (clients, reports) = tokio::try_join!(clients.list(&client_query), reports.list(&report_query))?;
    Ok(Snapshot { clients, reports })
}

/// Default criteria: every client, the trailing window ending today.
pub fn default_criteria(today: NaiveDate) -> ReportFilter {
    ReportFilter {
        client: Selection::All,
        range: Some(DateRange::trailing_days(today, DEFAULT_WINDOW_DAYS)),
    }
}

#[derive(Debug, Serialize)]
pub struct ReportsView<'a> {
    pub totals: MetricTotals,
    pub series: Vec<ChartPoint>,
    pub has_trend: bool,
    pub rows: Vec<ReportRow<'a>>,
}

/// Totals, chart series and history rows over already filtered reports.
pub fn summarize<'a>(reports: &[&'a Report], index: &ClientIndex<'a>) -> ReportsView<'a> {
    let series = chart_series(reports.iter().copied());
    ReportsView {
        totals: sum_metrics(reports.iter().copied()),
        has_trend: has_trend(&series),
        series,
        rows: reports
            .iter()
            .map(|&report| {
                ReportRow::new(report, index.name_or(&report.client_id, REPORTS_PLACEHOLDER))
            })
            .collect(),
    }
}

pub fn view<'a>(snapshot: &'a Snapshot, criteria: &ReportFilter) -> ReportsView<'a> {
    let index = ClientIndex::build(&snapshot.clients);
    let reports = filter_by(&snapshot.reports, criteria);
    summarize(&reports, &index)
}
