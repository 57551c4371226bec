//! Agency dashboard statistics.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::MonthRef;
use crate::models::client::Client;
use crate::models::post::Post;
use crate::status::PostStatus;

/// Number of clients listed under "recent clients".
pub const RECENT_CLIENTS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub active_clients: usize,
    pub posts_today: usize,
    pub scheduled_posts: usize,
    /// Posts marked posted whose scheduled date falls in the current month.
    pub posted_this_month: usize,
}

impl DashboardStats {
    pub fn compute(clients: &[Client], posts: &[Post], today: NaiveDate) -> Self {
        let month = MonthRef::of(today);
        let mut stats = Self {
            active_clients: clients.iter().filter(|c| c.is_active()).count(),
            ..Self::default()
        };
        for post in posts {
            let day = post.scheduled_day();
            if day == Some(today) {
                stats.posts_today += 1;
            }
            match post.status {
                PostStatus::Scheduled => stats.scheduled_posts += 1,
                PostStatus::Posted if day.is_some_and(|d| month.contains(d)) => {
                    stats.posted_this_month += 1
                }
                _ => {}
            }
        }
        stats
    }
}

/// Posts scheduled on `today`, in source order.
pub fn todays_posts(posts: &[Post], today: NaiveDate) -> Vec<&Post> {
    crate::calendar::posts_on(posts, today)
}

/// The first [`RECENT_CLIENTS`] clients of a list sorted newest first.
pub fn recent_clients(clients: &[Client]) -> &[Client] {
    &clients[..clients.len().min(RECENT_CLIENTS)]
}
