//! Report metrics: totals and chart series.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::report::Report;

/// Summed counters over a set of reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricTotals {
    pub followers: i64,
    pub impressions: i64,
    pub reach: i64,
    pub messages: i64,
    pub clicks: i64,
}

impl MetricTotals {
    /// Add one report's counters, treating missing counters as zero.
    /// Totals saturate at the bounds of `i64`.
    pub fn add(&mut self, report: &Report) {
        let add = |total: &mut i64, value: Option<i64>| {
            *total = total.saturating_add(value.unwrap_or(0));
        };
        add(&mut self.followers, report.followers_gained);
        add(&mut self.impressions, report.total_impressions);
        add(&mut self.reach, report.total_reach);
        add(&mut self.messages, report.total_messages);
        add(&mut self.clicks, report.bio_link_clicks);
    }
}

/// Reduce `reports` into a totals record. No reports yields all zeros.
pub fn sum_metrics<'a, I>(reports: I) -> MetricTotals
where
    I: IntoIterator<Item = &'a Report>,
{
    reports
        .into_iter()
        .fold(MetricTotals::default(), |mut acc, report| {
            acc.add(report);
            acc
        })
}

/// One point of the reach/followers/impressions charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// `dd/MM` axis label.
    pub label: String,
    pub period_start: NaiveDate,
    pub followers: i64,
    pub reach: i64,
    pub impressions: i64,
}

/// Shape reports into a chart series sorted ascending by period start.
///
/// Reports whose period start does not parse are left out. The sort is
/// stable, so reports sharing a start keep their source order.
pub fn chart_series<'a, I>(reports: I) -> Vec<ChartPoint>
where
    I: IntoIterator<Item = &'a Report>,
{
    let mut points: Vec<ChartPoint> = reports
        .into_iter()
        .filter_map(|report| {
            let start = report.start_day()?;
            Some(ChartPoint {
                label: start.format("%d/%m").to_string(),
                period_start: start,
                followers: report.followers_gained.unwrap_or(0),
                reach: report.total_reach.unwrap_or(0),
                impressions: report.total_impressions.unwrap_or(0),
            })
        })
        .collect();
    points.sort_by_key(|p| p.period_start);
    points
}

/// A trend line needs at least two points.
pub fn has_trend(series: &[ChartPoint]) -> bool {
    series.len() > 1
}

/// Format an engagement rate as `4.25%`, or `-` when absent or zero.
pub fn format_engagement_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) if r != 0.0 && r.is_finite() => format!("{r:.2}%"),
        _ => "-".to_string(),
    }
}
