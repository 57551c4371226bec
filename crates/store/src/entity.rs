//! Typed access to entity collections.
//!
//! [`Records`] wraps a [`RecordStore`] and converts between JSON records and
//! the entity types of `socialdesk-core`. Create and update payloads are
//! validated before they leave the process.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use socialdesk_core::models::billing::{Billing, CreateBilling, UpdateBilling};
use socialdesk_core::models::client::{Client, CreateClient, UpdateClient};
use socialdesk_core::models::post::{CreatePost, Post, UpdatePost};
use socialdesk_core::models::report::{CreateReport, Report, UpdateReport};
use validator::Validate;

use crate::contracts::RecordStore;
use crate::error::StoreResult;
use crate::query::{Filter, ListQuery};

/// An entity collection of the record store.
pub trait Entity: DeserializeOwned + Send + Sync {
    /// Collection name as the backend knows it.
    const NAME: &'static str;
    type Create: Serialize + Validate + Send + Sync;
    type Update: Serialize + Validate + Send + Sync;
}

impl Entity for Client {
    const NAME: &'static str = "Client";
    type Create = CreateClient;
    type Update = UpdateClient;
}

impl Entity for Post {
    const NAME: &'static str = "Post";
    type Create = CreatePost;
    type Update = UpdatePost;
}

impl Entity for Report {
    const NAME: &'static str = "Report";
    type Create = CreateReport;
    type Update = UpdateReport;
}

impl Entity for Billing {
    const NAME: &'static str = "Billing";
    type Create = CreateBilling;
    type Update = UpdateBilling;
}

/// Typed view of one collection.
pub struct Records<'s, E> {
    store: &'s dyn RecordStore,
    _entity: PhantomData<fn() -> E>,
}

/// Typed handle on the `E` collection of `store`.
pub fn records<E: Entity>(store: &dyn RecordStore) -> Records<'_, E> {
    Records {
        store,
        _entity: PhantomData,
    }
}

impl<E: Entity> Records<'_, E> {
    pub async fn list(&self, query: &ListQuery) -> StoreResult<Vec<E>> {
        let values = self.store.list(E::NAME, query).await?;
        decode_all(values)
    }

    pub async fn filter(&self, filter: &Filter, query: &ListQuery) -> StoreResult<Vec<E>> {
        let values = self.store.filter(E::NAME, filter, query).await?;
        decode_all(values)
    }

    pub async fn get(&self, id: &str) -> StoreResult<E> {
        let value = self.store.get(E::NAME, id).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn create(&self, input: &E::Create) -> StoreResult<E> {
        input.validate()?;
        let body = serde_json::to_value(input)?;
        let value = self.store.create(E::NAME, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn update(&self, id: &str, input: &E::Update) -> StoreResult<E> {
        input.validate()?;
        let patch = serde_json::to_value(input)?;
        let value = self.store.update(E::NAME, id, patch).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.store.delete(E::NAME, id).await
    }
}

fn decode_all<E: DeserializeOwned>(values: Vec<Value>) -> StoreResult<Vec<E>> {
    values
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(Into::into))
        .collect()
}
