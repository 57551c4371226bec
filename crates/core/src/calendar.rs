//! Month calendar: bucketing posts by scheduled day.
//!
//! Each post's scheduled date is parsed once. Posts whose date is missing or
//! unparseable fall into no bucket.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::dates::MonthRef;
use crate::models::post::Post;

/// The posts scheduled on one calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct DayBucket<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub posts: Vec<&'a Post>,
}

/// A Sunday-first month grid.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarGrid<'a> {
    pub month: MonthRef,
    /// Blank cells before day 1.
    pub leading_blanks: u32,
    pub days: Vec<DayBucket<'a>>,
}

impl<'a> CalendarGrid<'a> {
    /// Lay out `month` and bucket `posts` into its days.
    pub fn build<I>(posts: I, month: MonthRef, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let days = group_by_day(posts, month)
            .into_iter()
            .map(|bucket| DayBucket {
                is_today: bucket.date == today,
                ..bucket
            })
            .collect();
        Self {
            month,
            leading_blanks: month.leading_blank_days(),
            days,
        }
    }

    /// Number of posts placed in the grid.
    pub fn post_count(&self) -> usize {
        self.days.iter().map(|d| d.posts.len()).sum()
    }
}

/// Partition `posts` into one bucket per day of `month`, in day order.
///
/// Within a bucket posts keep their source order. Every day of the month
/// gets a bucket, empty or not.
pub fn group_by_day<'a, I>(posts: I, month: MonthRef) -> Vec<DayBucket<'a>>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut buckets: Vec<DayBucket<'a>> = month
        .days()
        .map(|date| DayBucket {
            date,
            is_today: false,
            posts: Vec::new(),
        })
        .collect();

    for post in posts {
        let Some(day) = post.scheduled_day() else {
            continue;
        };
        if !month.contains(day) {
            continue;
        }
        if let Some(bucket) = buckets.get_mut(day.day0() as usize) {
            bucket.posts.push(post);
        }
    }

    buckets
}

/// Posts scheduled on `day`, in source order.
pub fn posts_on<'a, I>(posts: I, day: NaiveDate) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    posts
        .into_iter()
        .filter(|p| p.scheduled_day() == Some(day))
        .collect()
}

/// Posts scheduled anywhere in `month`, in source order.
pub fn posts_in_month<'a, I>(posts: I, month: MonthRef) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    posts
        .into_iter()
        .filter(|p| p.scheduled_day().is_some_and(|d| month.contains(d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, date: &str) -> Post {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "client_id": "c1",
            "scheduled_date": date,
        }))
        .unwrap()
    }

    fn march() -> MonthRef {
        MonthRef::new(2024, 3).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn post_lands_only_in_its_day() {
        let posts = vec![post("p1", "2024-03-15")];
        let buckets = group_by_day(&posts, march());
        assert_eq!(buckets.len(), 31);
        for bucket in &buckets {
            if bucket.date == day(15) {
                assert_eq!(bucket.posts.len(), 1);
                assert_eq!(bucket.posts[0].id.as_str(), "p1");
            } else {
                assert!(bucket.posts.is_empty(), "unexpected post on {}", bucket.date);
            }
        }
    }

    #[test]
    fn post_outside_month_lands_nowhere() {
        let posts = vec![post("p1", "2024-03-15")];
        let april = MonthRef::new(2024, 4).unwrap();
        let buckets = group_by_day(&posts, april);
        assert_eq!(buckets.len(), 30);
        assert!(buckets.iter().all(|b| b.posts.is_empty()));
    }

    #[test]
    fn unparseable_date_lands_nowhere() {
        let posts = vec![post("p1", "tomorrow"), post("p2", "2024-03-01")];
        let grid = CalendarGrid::build(&posts, march(), day(1));
        assert_eq!(grid.post_count(), 1);
        assert!(posts_on(&posts, day(1)).iter().all(|p| p.id.as_str() == "p2"));
        assert_eq!(posts_in_month(&posts, march()).len(), 1);
    }

    #[test]
    fn bucket_keeps_source_order() {
        let posts = vec![
            post("late", "2024-03-10T18:00"),
            post("early", "2024-03-10T08:00"),
        ];
        let buckets = group_by_day(&posts, march());
        let ids: Vec<_> = buckets[9].posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "early"]);
    }

    #[test]
    fn grid_marks_today_and_leading_blanks() {
        let posts: Vec<Post> = Vec::new();
        let grid = CalendarGrid::build(&posts, march(), day(20));
        assert_eq!(grid.leading_blanks, 5);
        let today: Vec<_> = grid.days.iter().filter(|d| d.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, day(20));
    }
}
