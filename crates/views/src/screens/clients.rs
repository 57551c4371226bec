//! Client list with search, status filter and post counts.

use serde::Serialize;
use socialdesk_core::client_index::PostCounts;
use socialdesk_core::filter::{filter_by, ClientFilter};
use socialdesk_core::models::client::Client;
use socialdesk_core::models::post::Post;
use socialdesk_store::{records, ListQuery, RecordStore};

use crate::error::ViewResult;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub clients: Vec<Client>,
    pub posts: Vec<Post>,
}

pub async fn load(store: &dyn RecordStore) -> ViewResult<Snapshot> {
    let client_query = ListQuery::sorted("-created_date");
    let post_query = ListQuery::default();
    let clients = records::<Client>(store);
    let posts = records::<Post>(store);
    let (clients, posts) = tokio::try_join!(clients.list(&client_query), posts.list(&post_query))?;
    Ok(Snapshot { clients, posts })
}

#[derive(Debug, Serialize)]
pub struct ClientRow<'a> {
    #[serde(flatten)]
    pub client: &'a Client,
    pub initial: char,
    pub post_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ClientsView<'a> {
    pub rows: Vec<ClientRow<'a>>,
    pub total: usize,
    /// Whether a search or status selection narrows the list.
    pub filtered: bool,
}

pub fn view<'a>(snapshot: &'a Snapshot, criteria: &ClientFilter) -> ClientsView<'a> {
    let counts = PostCounts::tally(&snapshot.posts);
    let rows = filter_by(&snapshot.clients, criteria)
        .into_iter()
        .map(|client| ClientRow {
            client,
            initial: client.initial(),
            post_count: counts.count_for(&client.id),
        })
        .collect();

    ClientsView {
        rows,
        total: snapshot.clients.len(),
        filtered: criteria.is_active(),
    }
}
