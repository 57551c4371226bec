//! Shared query parameter types for API handlers.
//!
//! Selector values arrive as raw strings so an unknown status becomes a
//! 400 with the domain's validation message rather than a bare rejection.

use chrono::NaiveDate;
use serde::Deserialize;
use socialdesk_core::dates::{DateRange, MonthRef};
use socialdesk_core::filter::{ClientFilter, PostFilter, ReportFilter, Selection};
use socialdesk_core::financial::BillingFilter;
use socialdesk_core::status::PostStatus;
use socialdesk_core::types::ClientId;
use socialdesk_store::{Filter, ListQuery, SortKey};

use crate::error::{AppError, AppResult};

/// Upper bound on `limit` for list endpoints.
pub const MAX_LIMIT: usize = 500;

/// Parameters of the plain entity list endpoints
/// (`?sort=-created_date&limit=50&client_id=c1`).
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Field name, prefixed with `-` for descending order.
    pub sort: Option<String>,
    pub limit: Option<usize>,
    /// Restrict to records of one client. Ignored for clients themselves.
    pub client_id: Option<String>,
}

impl ListParams {
    /// Sort and limit, using `default_sort` when none was given.
    pub fn list_query(&self, default_sort: &str) -> ListQuery {
        let sort = self
            .sort
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(default_sort);
        ListQuery {
            sort: Some(SortKey::parse(sort)),
            limit: self.limit.map(|l| l.min(MAX_LIMIT)),
        }
    }

    /// Equality filter on `client_id`, when one was given.
    pub fn client_filter(&self) -> Option<Filter> {
        self.client_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| Filter::new().field_eq("client_id", id))
    }
}

/// `GET /views/clients?search&status`
#[derive(Debug, Default, Deserialize)]
pub struct ClientsViewParams {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl ClientsViewParams {
    pub fn criteria(&self) -> AppResult<ClientFilter> {
        Ok(ClientFilter {
            search: self.search.clone().unwrap_or_default(),
            status: Selection::parse(self.status.as_deref())?,
        })
    }
}

/// `GET /views/calendar?client_id&status&year&month`
///
/// Also used by the portal calendar, which ignores `client_id`.
#[derive(Debug, Default, Deserialize)]
pub struct CalendarViewParams {
    pub client_id: Option<String>,
    pub status: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl CalendarViewParams {
    /// The requested month, or the month containing `today`.
    pub fn month(&self, today: NaiveDate) -> AppResult<MonthRef> {
        match (self.year, self.month) {
            (None, None) => Ok(MonthRef::of(today)),
            (Some(year), Some(month)) => Ok(MonthRef::new(year, month)?),
            _ => Err(AppError::BadRequest(
                "year and month must be given together".into(),
            )),
        }
    }

    pub fn status(&self) -> AppResult<Selection<PostStatus>> {
        Ok(Selection::parse(self.status.as_deref())?)
    }

    pub fn post_filter(&self) -> AppResult<PostFilter> {
        Ok(PostFilter {
            client: client_selection(self.client_id.as_deref()),
            status: self.status()?,
        })
    }
}

/// `GET /views/reports?client_id&start&end&all`
#[derive(Debug, Default, Deserialize)]
pub struct ReportsViewParams {
    pub client_id: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Ignore the date window entirely.
    #[serde(default)]
    pub all: bool,
}

impl ReportsViewParams {
    /// The requested window. `None` means unbounded; with neither bound nor
    /// `all` given, `default` applies.
    pub fn range(&self, default: DateRange) -> AppResult<Option<DateRange>> {
        if self.all {
            return Ok(None);
        }
        match (self.start, self.end) {
            (None, None) => Ok(Some(default)),
            (Some(start), Some(end)) => Ok(Some(DateRange::new(start, end)?)),
            _ => Err(AppError::BadRequest(
                "start and end must be given together".into(),
            )),
        }
    }

    pub fn report_filter(&self, default: DateRange) -> AppResult<ReportFilter> {
        Ok(ReportFilter {
            client: client_selection(self.client_id.as_deref()),
            range: self.range(default)?,
        })
    }
}

/// `GET /views/financial?client_id&status`
#[derive(Debug, Default, Deserialize)]
pub struct FinancialViewParams {
    pub client_id: Option<String>,
    pub status: Option<String>,
}

impl FinancialViewParams {
    pub fn criteria(&self) -> AppResult<BillingFilter> {
        Ok(BillingFilter {
            client: client_selection(self.client_id.as_deref()),
            status: Selection::parse(self.status.as_deref())?,
        })
    }
}

fn client_selection(raw: Option<&str>) -> Selection<ClientId> {
    match Selection::parse(raw) {
        Ok(selection) => selection,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use socialdesk_core::status::BillingStatus;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn list_query_falls_back_to_default_sort_and_caps_limit() {
        let params = ListParams {
            limit: Some(10_000),
            ..Default::default()
        };
        let query = params.list_query("-created_date");
        assert_eq!(query.sort, Some(SortKey::parse("-created_date")));
        assert_eq!(query.limit, Some(MAX_LIMIT));
        assert!(params.client_filter().is_none());
    }

    #[test]
    fn calendar_month_defaults_to_today() {
        let today = day(2024, 3, 20);
        let params = CalendarViewParams::default();
        assert_eq!(params.month(today).unwrap(), MonthRef::of(today));

        let half = CalendarViewParams {
            year: Some(2024),
            ..Default::default()
        };
        assert_matches!(half.month(today), Err(AppError::BadRequest(_)));

        let bad = CalendarViewParams {
            year: Some(2024),
            month: Some(13),
            ..Default::default()
        };
        assert_matches!(bad.month(today), Err(AppError::Core(_)));
    }

    #[test]
    fn reports_range_defaults_and_validates() {
        let default = DateRange::trailing_days(day(2024, 3, 20), 30);
        assert_eq!(ReportsViewParams::default().range(default).unwrap(), Some(default));

        let all = ReportsViewParams {
            all: true,
            ..Default::default()
        };
        assert_eq!(all.range(default).unwrap(), None);

        let reversed = ReportsViewParams {
            start: Some(day(2024, 3, 10)),
            end: Some(day(2024, 3, 1)),
            ..Default::default()
        };
        assert_matches!(reversed.range(default), Err(AppError::Core(_)));
    }

    #[test]
    fn financial_selectors_parse_all_and_specific() {
        let params = FinancialViewParams {
            client_id: Some("all".into()),
            status: Some("overdue".into()),
        };
        let criteria = params.criteria().unwrap();
        assert!(criteria.client.is_all());
        assert_eq!(criteria.status, Selection::Only(BillingStatus::Overdue));

        let unknown = FinancialViewParams {
            status: Some("lost".into()),
            ..Default::default()
        };
        assert_matches!(unknown.criteria(), Err(AppError::Core(_)));
    }
}
