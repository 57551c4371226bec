//! Backend contracts.

use async_trait::async_trait;
use serde_json::Value;
use socialdesk_core::models::user::CurrentUser;

use crate::error::StoreResult;
use crate::query::{Filter, ListQuery};

/// Generic record store over JSON records, addressed by entity name.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self, entity: &'static str, query: &ListQuery) -> StoreResult<Vec<Value>>;

    async fn filter(
        &self,
        entity: &'static str,
        filter: &Filter,
        query: &ListQuery,
    ) -> StoreResult<Vec<Value>>;

    /// Fetch one record. An unknown id is [`StoreError::NotFound`](crate::StoreError::NotFound).
    async fn get(&self, entity: &'static str, id: &str) -> StoreResult<Value>;

    async fn create(&self, entity: &'static str, body: Value) -> StoreResult<Value>;

    /// Apply a partial update and return the stored record.
    async fn update(&self, entity: &'static str, id: &str, patch: Value) -> StoreResult<Value>;

    async fn delete(&self, entity: &'static str, id: &str) -> StoreResult<()>;
}

/// Resolves an access token into the signed-in user.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user(&self, access_token: &str) -> StoreResult<CurrentUser>;
}

/// A file to upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Stores files and hands back their public URL.
#[async_trait]
pub trait FileUploader: Send + Sync {
    async fn upload(&self, file: UploadFile) -> StoreResult<String>;
}
