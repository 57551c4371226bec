//! One module per dashboard screen.
//!
//! Every screen follows the same shape: a `Snapshot` of the collections it
//! loads, an async `load` fetching them concurrently, and a pure `view`
//! deriving the rendered view from a snapshot and the screen's criteria.

use serde::Serialize;
use socialdesk_core::models::post::Post;
use socialdesk_core::models::report::Report;
use socialdesk_core::metrics::format_engagement_rate;

pub mod calendar;
pub mod clients;
pub mod dashboard;
pub mod financial;
pub mod portal;
pub mod reports;

/// A post with the display name of its client.
#[derive(Debug, Clone, Serialize)]
pub struct PostCard<'a> {
    #[serde(flatten)]
    pub post: &'a Post,
    pub client_name: &'a str,
}

/// A report row of the history table.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow<'a> {
    #[serde(flatten)]
    pub report: &'a Report,
    pub client_name: &'a str,
    pub engagement: String,
}

impl<'a> ReportRow<'a> {
    pub fn new(report: &'a Report, client_name: &'a str) -> Self {
        Self {
            report,
            client_name,
            engagement: format_engagement_rate(report.engagement_rate),
        }
    }
}
