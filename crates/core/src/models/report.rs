//! Report entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dates::parse_calendar_date;
use crate::models::{lenient, not_blank};
use crate::types::{ClientId, ReportId};

/// Performance counters for one client over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub client_id: ClientId,
    #[serde(default)]
    pub period_start: Option<String>,
    #[serde(default)]
    pub period_end: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub followers_gained: Option<i64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_impressions: Option<i64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_reach: Option<i64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_messages: Option<i64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub bio_link_clicks: Option<i64>,
    /// Percentage, e.g. `4.25` for 4.25%.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub engagement_rate: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Report {
    pub fn start_day(&self) -> Option<NaiveDate> {
        self.period_start.as_deref().and_then(parse_calendar_date)
    }

    pub fn end_day(&self) -> Option<NaiveDate> {
        self.period_end.as_deref().and_then(parse_calendar_date)
    }
}

/// DTO for creating a new report. Omitted counters default to zero.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReport {
    pub client_id: ClientId,
    #[validate(custom(function = "not_blank"))]
    pub period_start: String,
    #[validate(custom(function = "not_blank"))]
    pub period_end: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub followers_gained: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub total_impressions: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub total_reach: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub total_messages: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub bio_link_clicks: i64,
    #[serde(default)]
    pub engagement_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// DTO for updating an existing report. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub followers_gained: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub total_impressions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub total_reach: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub total_messages: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub bio_link_clicks: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
