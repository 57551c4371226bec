//! Process-local backend.
//!
//! Records live in insertion order per entity. Sort, limit and filter follow
//! the same rules as the hosted backend. Users are keyed by access token.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use socialdesk_core::models::user::CurrentUser;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::contracts::{FileUploader, IdentityProvider, RecordStore, UploadFile};
use crate::error::{StoreError, StoreResult};
use crate::query::{Filter, ListQuery};

/// Prefix of URLs handed out for uploaded files.
pub const UPLOAD_URL_PREFIX: &str = "memory://uploads";

#[derive(Debug, Default)]
pub struct InMemoryBackend {
    tables: RwLock<HashMap<&'static str, Vec<Value>>>,
    users: RwLock<HashMap<String, CurrentUser>>,
    files: RwLock<HashMap<String, UploadFile>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `user` under `access_token`.
    pub async fn add_user(&self, access_token: &str, user: CurrentUser) {
        self.users
            .write()
            .await
            .insert(access_token.to_string(), user);
    }

    /// Insert records verbatim, bypassing id and timestamp stamping.
    pub async fn seed(&self, entity: &'static str, records: Vec<Value>) {
        self.tables
            .write()
            .await
            .entry(entity)
            .or_default()
            .extend(records);
    }

    /// A previously uploaded file, by URL.
    pub async fn file(&self, url: &str) -> Option<UploadFile> {
        self.files.read().await.get(url).cloned()
    }

    async fn select(
        &self,
        entity: &'static str,
        filter: Option<&Filter>,
        query: &ListQuery,
    ) -> Vec<Value> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Value> = tables
            .get(entity)
            .map(|rows| {
                rows.iter()
                    .filter(|r| filter.map_or(true, |f| f.matches(r)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if let Some(sort) = &query.sort {
            rows.sort_by(|a, b| sort.compare(a, b));
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        rows
    }
}

fn id_of(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn not_found(entity: &'static str, id: &str) -> StoreError {
    StoreError::NotFound {
        entity,
        id: id.to_string(),
    }
}

fn expect_object(value: Value) -> StoreResult<serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Validation(format!(
            "Record body must be a JSON object, got {other}"
        ))),
    }
}

#[async_trait]
impl RecordStore for InMemoryBackend {
    async fn list(&self, entity: &'static str, query: &ListQuery) -> StoreResult<Vec<Value>> {
        Ok(self.select(entity, None, query).await)
    }

    async fn filter(
        &self,
        entity: &'static str,
        filter: &Filter,
        query: &ListQuery,
    ) -> StoreResult<Vec<Value>> {
        Ok(self.select(entity, Some(filter), query).await)
    }

    async fn get(&self, entity: &'static str, id: &str) -> StoreResult<Value> {
        let tables = self.tables.read().await;
        tables
            .get(entity)
            .and_then(|rows| rows.iter().find(|r| id_of(r) == Some(id)))
            .cloned()
            .ok_or_else(|| not_found(entity, id))
    }

    async fn create(&self, entity: &'static str, body: Value) -> StoreResult<Value> {
        let mut record = expect_object(body)?;
        let id = Uuid::new_v4().to_string();
        record.insert("id".into(), Value::String(id.clone()));
        record.insert(
            "created_date".into(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        let record = Value::Object(record);

        self.tables
            .write()
            .await
            .entry(entity)
            .or_default()
            .push(record.clone());
        tracing::debug!(entity, id = %id, "Record created");
        Ok(record)
    }

    async fn update(&self, entity: &'static str, id: &str, patch: Value) -> StoreResult<Value> {
        let patch = expect_object(patch)?;
        let mut tables = self.tables.write().await;
        let record = tables
            .get_mut(entity)
            .and_then(|rows| rows.iter_mut().find(|r| id_of(r) == Some(id)))
            .ok_or_else(|| not_found(entity, id))?;
        if let Some(fields) = record.as_object_mut() {
            for (key, value) in patch {
                if key != "id" {
                    fields.insert(key, value);
                }
            }
        }
        Ok(record.clone())
    }

    async fn delete(&self, entity: &'static str, id: &str) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let rows = tables.get_mut(entity).ok_or_else(|| not_found(entity, id))?;
        let before = rows.len();
        rows.retain(|r| id_of(r) != Some(id));
        if rows.len() == before {
            return Err(not_found(entity, id));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for InMemoryBackend {
    async fn current_user(&self, access_token: &str) -> StoreResult<CurrentUser> {
        self.users
            .read()
            .await
            .get(access_token)
            .cloned()
            .ok_or(StoreError::Unauthorized)
    }
}

#[async_trait]
impl FileUploader for InMemoryBackend {
    async fn upload(&self, file: UploadFile) -> StoreResult<String> {
        let url = format!("{UPLOAD_URL_PREFIX}/{}/{}", Uuid::new_v4(), file.file_name);
        self.files.write().await.insert(url.clone(), file);
        Ok(url)
    }
}
