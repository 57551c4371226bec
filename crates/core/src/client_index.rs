//! Client lookup and per-client post counts.
//!
//! Built once per snapshot so that name lookups in list rows are O(1).

use std::collections::HashMap;

use crate::models::client::Client;
use crate::models::post::Post;
use crate::types::ClientId;

/// Placeholder shown on dashboard rows whose client is missing.
pub const DASHBOARD_PLACEHOLDER: &str = "Client";
/// Placeholder shown on billing rows whose client is missing.
pub const FINANCIAL_PLACEHOLDER: &str = "Client not found";
/// Placeholder shown on report rows whose client is missing.
pub const REPORTS_PLACEHOLDER: &str = "-";
/// Placeholder shown on calendar cards whose client is missing.
pub const CALENDAR_PLACEHOLDER: &str = "";

#[derive(Debug, Default)]
pub struct ClientIndex<'a> {
    by_id: HashMap<&'a ClientId, &'a Client>,
}

impl<'a> ClientIndex<'a> {
    pub fn build<I>(clients: I) -> Self
    where
        I: IntoIterator<Item = &'a Client>,
    {
        let by_id = clients.into_iter().map(|c| (&c.id, c)).collect();
        Self { by_id }
    }

    pub fn get(&self, id: &ClientId) -> Option<&'a Client> {
        self.by_id.get(id).copied()
    }

    /// Display name of `id`, or `placeholder` when the client is unknown.
    pub fn name_or<'p>(&self, id: &ClientId, placeholder: &'p str) -> &'p str
    where
        'a: 'p,
    {
        self.get(id)
            .map(|c| c.company_name.as_str())
            .unwrap_or(placeholder)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Number of posts per client id. Clients without posts are absent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PostCounts {
    counts: HashMap<ClientId, usize>,
}

impl PostCounts {
    pub fn tally<'a, I>(posts: I) -> Self
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let mut counts: HashMap<ClientId, usize> = HashMap::new();
        for post in posts {
            *counts.entry(post.client_id.clone()).or_default() += 1;
        }
        Self { counts }
    }

    pub fn count_for(&self, id: &ClientId) -> usize {
        self.counts.get(id).copied().unwrap_or(0)
    }
}
