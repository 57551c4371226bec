//! Agency dashboard.

use chrono::NaiveDate;
use serde::Serialize;
use socialdesk_core::client_index::{ClientIndex, DASHBOARD_PLACEHOLDER};
use socialdesk_core::dashboard::{recent_clients, todays_posts, DashboardStats};
use socialdesk_core::models::client::Client;
use socialdesk_core::models::post::Post;
use socialdesk_store::{records, ListQuery, RecordStore};

use super::PostCard;
use crate::error::ViewResult;

/// Number of most recent posts the dashboard reads.
pub const POST_WINDOW: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Newest first.
    pub clients: Vec<Client>,
    /// Latest scheduled first, capped at [`POST_WINDOW`].
    pub posts: Vec<Post>,
}

pub async fn load(store: &dyn RecordStore) -> ViewResult<Snapshot> {
    let clients = records::<Client>(store);
    let posts = records::<Post>(store);
    let client_query = ListQuery::sorted("-created_date");
    let post_query = ListQuery::sorted("-scheduled_date").limit(POST_WINDOW);

    let (clients, posts) = tokio::try_join!(clients.list(&client_query), posts.list(&post_query))?;
    Ok(Snapshot { clients, posts })
}

#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    pub stats: DashboardStats,
    pub todays_posts: Vec<PostCard<'a>>,
    pub recent_clients: &'a [Client],
}

pub fn view(snapshot: &Snapshot, today: NaiveDate) -> DashboardView<'_> {
    let index = ClientIndex::build(&snapshot.clients);
    let todays_posts = todays_posts(&snapshot.posts, today)
        .into_iter()
        .map(|post| PostCard {
            post,
            client_name: index.name_or(&post.client_id, DASHBOARD_PLACEHOLDER),
        })
        .collect();

    DashboardView {
        stats: DashboardStats::compute(&snapshot.clients, &snapshot.posts, today),
        todays_posts,
        recent_clients: recent_clients(&snapshot.clients),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use socialdesk_store::memory::InMemoryBackend;

    use super::*;

    #[tokio::test]
    async fn loads_and_derives_dashboard() {
        let store = InMemoryBackend::new();
        store
            .seed(
                "Client",
                vec![
                    json!({"id": "c1", "company_name": "Padaria Sol", "created_date": "2024-01-02"}),
                    json!({"id": "c2", "company_name": "Oficina Lua", "status": "inactive", "created_date": "2024-02-01"}),
                ],
            )
            .await;
        store
            .seed(
                "Post",
                vec![
                    json!({"id": "p1", "client_id": "c1", "scheduled_date": "2024-03-15", "status": "scheduled"}),
                    json!({"id": "p2", "client_id": "gone", "scheduled_date": "2024-03-15"}),
                ],
            )
            .await;

        let snapshot = load(&store).await.unwrap();
        assert_eq!(snapshot.clients[0].id.as_str(), "c2");

        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let view = view(&snapshot, today);
        assert_eq!(view.stats.active_clients, 1);
        assert_eq!(view.stats.posts_today, 2);
        assert_eq!(view.stats.scheduled_posts, 1);
        let names: Vec<_> = view.todays_posts.iter().map(|c| c.client_name).collect();
        assert!(names.contains(&"Padaria Sol"));
        assert!(names.contains(&"Client"));
        assert_eq!(view.recent_clients.len(), 2);
    }
}
