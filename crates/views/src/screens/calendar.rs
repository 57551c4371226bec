//! Agency content calendar.

use chrono::NaiveDate;
use serde::Serialize;
use socialdesk_core::calendar::CalendarGrid;
use socialdesk_core::client_index::{ClientIndex, CALENDAR_PLACEHOLDER};
use socialdesk_core::dates::MonthRef;
use socialdesk_core::filter::{filter_by, PostFilter};
use socialdesk_core::models::client::Client;
use socialdesk_core::models::post::Post;
use socialdesk_store::{records, ListQuery, RecordStore};

use super::PostCard;
use crate::error::ViewResult;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub clients: Vec<Client>,
    /// Latest scheduled first.
    pub posts: Vec<Post>,
}

pub async fn load(store: &dyn RecordStore) -> ViewResult<Snapshot> {
    let client_query = ListQuery::default();
    let post_query = ListQuery::sorted("-scheduled_date");
    let clients = records::<Client>(store);
    let posts = records::<Post>(store);
    let (clients, posts) = tokio::try_join!(clients.list(&client_query), posts.list(&post_query))?;
    Ok(Snapshot { clients, posts })
}

#[derive(Debug, Clone)]
pub struct Criteria {
    pub month: MonthRef,
    pub filter: PostFilter,
}

impl Criteria {
    /// The month containing `today`, unfiltered.
    pub fn for_month_of(today: NaiveDate) -> Self {
        Self {
            month: MonthRef::of(today),
            filter: PostFilter::default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub posts: Vec<PostCard<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CalendarView<'a> {
    pub month: MonthRef,
    pub previous: MonthRef,
    pub next: MonthRef,
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay<'a>>,
    pub post_count: usize,
}

/// Lay out `posts` for `month`, labelling each card through `index`.
pub fn month_view<'a>(
    posts: Vec<&'a Post>,
    index: &ClientIndex<'a>,
    month: MonthRef,
    today: NaiveDate,
) -> CalendarView<'a> {
    let grid = CalendarGrid::build(posts, month, today);
    let post_count = grid.post_count();
    let days = grid
        .days
        .into_iter()
        .map(|day| CalendarDay {
            date: day.date,
            is_today: day.is_today,
            posts: day
                .posts
                .into_iter()
                .map(|post| PostCard {
                    post,
                    client_name: index.name_or(&post.client_id, CALENDAR_PLACEHOLDER),
                })
                .collect(),
        })
        .collect();

    CalendarView {
        month,
        previous: month.prev(),
        next: month.next(),
        leading_blanks: grid.leading_blanks,
        days,
        post_count,
    }
}

pub fn view<'a>(snapshot: &'a Snapshot, criteria: &Criteria, today: NaiveDate) -> CalendarView<'a> {
    let index = ClientIndex::build(&snapshot.clients);
    let posts = filter_by(&snapshot.posts, &criteria.filter);
    month_view(posts, &index, criteria.month, today)
}
