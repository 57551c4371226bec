//! Client portal: the calendar, reports and profile of the signed-in
//! client user's own brand.
//!
//! Every portal load resolves the linked client from the user's email first
//! and then fetches only that client's records.

use chrono::NaiveDate;
use serde::Serialize;
use socialdesk_core::client_index::ClientIndex;
use socialdesk_core::dates::{DateRange, MonthRef};
use socialdesk_core::filter::{filter_by, PostFilter, ReportFilter, Selection};
use socialdesk_core::models::client::Client;
use socialdesk_core::models::post::Post;
use socialdesk_core::models::report::Report;
use socialdesk_core::models::user::CurrentUser;
use socialdesk_core::roles::can_client_approve;
use socialdesk_core::status::PostStatus;
use socialdesk_core::types::PostId;
use socialdesk_store::{records, Filter, ListQuery, RecordStore};

use super::calendar::{month_view, CalendarView};
use super::reports::{summarize, ReportsView};
use crate::error::{ViewError, ViewResult};

/// Default reporting window of the portal, in days.
pub const DEFAULT_WINDOW_DAYS: u64 = 90;

/// The client record linked to `user` by login email.
pub async fn resolve_client(store: &dyn RecordStore, user: &CurrentUser) -> ViewResult<Client> {
    let filter = Filter::new().field_eq("user_email", user.email.as_str());
    let linked = records::<Client>(store)
        .filter(&filter, &ListQuery::default().limit(1))
        .await?;
    linked
        .into_iter()
        .find(|c| c.belongs_to(&user.email))
        .ok_or_else(|| ViewError::NoLinkedClient {
            email: user.email.clone(),
        })
}

fn own_records(client: &Client) -> Filter {
    Filter::new().field_eq("client_id", client.id.as_str())
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CalendarSnapshot {
    pub client: Client,
    /// Latest scheduled first.
    pub posts: Vec<Post>,
}

pub async fn load_calendar(
    store: &dyn RecordStore,
    user: &CurrentUser,
) -> ViewResult<CalendarSnapshot> {
    let client = resolve_client(store, user).await?;
    let posts = records::<Post>(store)
        .filter(&own_records(&client), &ListQuery::sorted("-scheduled_date"))
        .await?;
    Ok(CalendarSnapshot { client, posts })
}

#[derive(Debug, Clone)]
pub struct CalendarCriteria {
    pub month: MonthRef,
    pub status: Selection<PostStatus>,
}

impl CalendarCriteria {
    pub fn for_month_of(today: NaiveDate) -> Self {
        Self {
            month: MonthRef::of(today),
            status: Selection::All,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PortalCalendarView<'a> {
    pub client: &'a Client,
    #[serde(flatten)]
    pub calendar: CalendarView<'a>,
    /// Posts of the month the client may still approve.
    pub approvable: Vec<&'a PostId>,
}

pub fn calendar_view<'a>(
    snapshot: &'a CalendarSnapshot,
    criteria: &CalendarCriteria,
    today: NaiveDate,
) -> PortalCalendarView<'a> {
    let index = ClientIndex::build(std::slice::from_ref(&snapshot.client));
    let filter = PostFilter {
        client: Selection::All,
        status: criteria.status.clone(),
    };
    let posts = filter_by(&snapshot.posts, &filter);
    let calendar = month_view(posts, &index, criteria.month, today);
    let approvable = calendar
        .days
        .iter()
        .flat_map(|day| day.posts.iter().map(|card| card.post))
        .filter(|post| can_client_approve(post.status))
        .map(|post| &post.id)
        .collect();

    PortalCalendarView {
        client: &snapshot.client,
        calendar,
        approvable,
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ReportsSnapshot {
    pub client: Client,
    /// Latest period end first.
    pub reports: Vec<Report>,
}

pub async fn load_reports(
    store: &dyn RecordStore,
    user: &CurrentUser,
) -> ViewResult<ReportsSnapshot> {
    let client = resolve_client(store, user).await?;
    let reports = records::<Report>(store)
        .filter(&own_records(&client), &ListQuery::sorted("-period_end"))
        .await?;
    Ok(ReportsSnapshot { client, reports })
}

/// The trailing portal window ending today.
pub fn default_range(today: NaiveDate) -> DateRange {
    DateRange::trailing_days(today, DEFAULT_WINDOW_DAYS)
}

#[derive(Debug, Serialize)]
pub struct PortalReportsView<'a> {
    pub client: &'a Client,
    #[serde(flatten)]
    pub reports: ReportsView<'a>,
}

pub fn reports_view(snapshot: &ReportsSnapshot, range: Option<DateRange>) -> PortalReportsView<'_> {
    let index = ClientIndex::build(std::slice::from_ref(&snapshot.client));
    let filter = ReportFilter {
        client: Selection::All,
        range,
    };
    let reports = filter_by(&snapshot.reports, &filter);
    PortalReportsView {
        client: &snapshot.client,
        reports: summarize(&reports, &index),
    }
}
