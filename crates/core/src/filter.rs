//! Criteria-based filtering over in-memory record collections.
//!
//! Filtering never fails: a criteria set that matches nothing yields an
//! empty list. Results keep the order of the source collection.

use std::str::FromStr;

use crate::dates::DateRange;
use crate::models::client::Client;
use crate::models::post::Post;
use crate::models::report::Report;
use crate::status::{ClientStatus, PostStatus};
use crate::types::ClientId;

/// Value used by selectors to mean "no restriction".
pub const SELECT_ALL: &str = "all";

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// A selector value: either everything or one specific value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(v) => Some(v),
        }
    }
}

impl<T: FromStr> Selection<T> {
    /// Parse a selector value. Absent, empty or `"all"` selects everything.
    pub fn parse(raw: Option<&str>) -> Result<Self, T::Err> {
        match raw.map(str::trim) {
            None | Some("") | Some(SELECT_ALL) => Ok(Selection::All),
            Some(value) => value.parse().map(Selection::Only),
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selection::All, Selection::Only)
    }
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// A predicate over one record type.
pub trait Criteria<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Borrow every item matching `criteria`, in source order.
pub fn filter_by<'a, T, C>(items: &'a [T], criteria: &C) -> Vec<&'a T>
where
    C: Criteria<T> + ?Sized,
{
    items.iter().filter(|item| criteria.matches(item)).collect()
}

/// Post selectors shared by the agency calendar and the client portal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub client: Selection<ClientId>,
    pub status: Selection<PostStatus>,
}

impl Criteria<Post> for PostFilter {
    fn matches(&self, post: &Post) -> bool {
        self.client.matches(&post.client_id) && self.status.matches(&post.status)
    }
}

/// Report selectors: client plus an optional reporting window.
///
/// A report matches the window when its whole period lies inside it. A
/// report whose period does not parse never matches an active window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub client: Selection<ClientId>,
    pub range: Option<DateRange>,
}

impl Criteria<Report> for ReportFilter {
    fn matches(&self, report: &Report) -> bool {
        if !self.client.matches(&report.client_id) {
            return false;
        }
        let Some(range) = self.range else {
            return true;
        };
        match (report.start_day(), report.end_day()) {
            (Some(start), Some(end)) => range.covers(start, end),
            _ => false,
        }
    }
}

/// Client list selectors: free-text search plus status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    /// Case-insensitive substring of company name or login email.
    pub search: String,
    pub status: Selection<ClientStatus>,
}

impl ClientFilter {
    /// Whether any selector narrows the list.
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || !self.status.is_all()
    }
}

impl Criteria<Client> for ClientFilter {
    fn matches(&self, client: &Client) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || client.company_name.to_lowercase().contains(&needle)
            || client.user_email.to_lowercase().contains(&needle);
        matches_search && self.status.matches(&client.status)
    }
}
