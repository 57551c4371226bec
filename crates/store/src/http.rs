//! REST client for the hosted backend.
//!
//! Wraps the backend's entity, identity and upload endpoints using
//! [`reqwest`]. One [`HttpBackend`] implements all three contracts.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use socialdesk_core::models::user::CurrentUser;

use crate::contracts::{FileUploader, IdentityProvider, RecordStore, UploadFile};
use crate::error::{StoreError, StoreResult};
use crate::query::{Filter, ListQuery};

/// Header carrying the application API key.
const API_KEY_HEADER: &str = "api_key";

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, e.g. `https://app.example.com`.
    pub base_url: String,
    pub app_id: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl BackendConfig {
    /// Load backend settings from environment variables.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `BACKEND_URL`          | (required) |
    /// | `BACKEND_APP_ID`       | (required) |
    /// | `BACKEND_API_KEY`      | unset      |
    /// | `BACKEND_TIMEOUT_SECS` | `30`       |
    pub fn from_env() -> StoreResult<Self> {
        let base_url = required_var("BACKEND_URL")?;
        let app_id = required_var("BACKEND_APP_ID")?;
        let api_key = std::env::var("BACKEND_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let timeout_secs: u64 = std::env::var("BACKEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .map_err(|_| StoreError::Config("BACKEND_TIMEOUT_SECS must be a valid u64".into()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn required_var(name: &str) -> StoreResult<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| StoreError::Config(format!("{name} must be set")))
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file_url: String,
}

/// HTTP client for one backend application.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> StoreResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Create a backend reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: BackendConfig) -> Self {
        Self { client, config }
    }

    fn app_url(&self) -> String {
        format!("{}/api/apps/{}", self.config.base_url, self.config.app_id)
    }

    fn entity_url(&self, entity: &str) -> String {
        format!("{}/entities/{}", self.app_url(), entity)
    }

    fn record_url(&self, entity: &str, id: &str) -> String {
        format!("{}/{}", self.entity_url(entity), id)
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.config.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    async fn fetch_list(
        &self,
        entity: &'static str,
        filter: Option<&Filter>,
        query: &ListQuery,
    ) -> StoreResult<Vec<Value>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(filter) = filter {
            params.push(("q", filter.to_query_param()));
        }
        if let Some(sort) = &query.sort {
            params.push(("sort", sort.to_string()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }

        let response = self
            .request(reqwest::Method::GET, self.entity_url(entity))
            .query(&params)
            .send()
            .await?;

        let records: Vec<Value> = Self::parse_response(response).await?;
        tracing::debug!(entity, count = records.len(), "Fetched records");
        Ok(records)
    }

    // ---- private helpers ----

    /// Map a 404 on a single-record call to [`StoreError::NotFound`].
    fn not_found(
        response: &reqwest::Response,
        entity: &'static str,
        id: &str,
    ) -> Option<StoreError> {
        (response.status() == StatusCode::NOT_FOUND).then(|| StoreError::NotFound {
            entity,
            id: id.to_string(),
        })
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`StoreError::Api`] containing the status
    /// and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> StoreResult<T> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> StoreResult<()> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for HttpBackend {
    async fn list(&self, entity: &'static str, query: &ListQuery) -> StoreResult<Vec<Value>> {
        self.fetch_list(entity, None, query).await
    }

    async fn filter(
        &self,
        entity: &'static str,
        filter: &Filter,
        query: &ListQuery,
    ) -> StoreResult<Vec<Value>> {
        self.fetch_list(entity, Some(filter), query).await
    }

    async fn get(&self, entity: &'static str, id: &str) -> StoreResult<Value> {
        let response = self
            .request(reqwest::Method::GET, self.record_url(entity, id))
            .send()
            .await?;
        if let Some(err) = Self::not_found(&response, entity, id) {
            return Err(err);
        }
        Self::parse_response(response).await
    }

    async fn create(&self, entity: &'static str, body: Value) -> StoreResult<Value> {
        let response = self
            .request(reqwest::Method::POST, self.entity_url(entity))
            .json(&body)
            .send()
            .await?;
        let created: Value = Self::parse_response(response).await?;
        tracing::info!(entity, id = ?created.get("id"), "Record created");
        Ok(created)
    }

    async fn update(&self, entity: &'static str, id: &str, patch: Value) -> StoreResult<Value> {
        let response = self
            .request(reqwest::Method::PUT, self.record_url(entity, id))
            .json(&patch)
            .send()
            .await?;
        if let Some(err) = Self::not_found(&response, entity, id) {
            return Err(err);
        }
        let updated = Self::parse_response(response).await?;
        tracing::info!(entity, id, "Record updated");
        Ok(updated)
    }

    async fn delete(&self, entity: &'static str, id: &str) -> StoreResult<()> {
        let response = self
            .request(reqwest::Method::DELETE, self.record_url(entity, id))
            .send()
            .await?;
        if let Some(err) = Self::not_found(&response, entity, id) {
            return Err(err);
        }
        Self::check_status(response).await?;
        tracing::info!(entity, id, "Record deleted");
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for HttpBackend {
    async fn current_user(&self, access_token: &str) -> StoreResult<CurrentUser> {
        let response = self
            .request(reqwest::Method::GET, self.record_url("User", "me"))
            .bearer_auth(access_token)
            .send()
            .await?;
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(StoreError::Unauthorized);
        }
        Self::parse_response(response).await
    }
}

#[async_trait]
impl FileUploader for HttpBackend {
    async fn upload(&self, file: UploadFile) -> StoreResult<String> {
        let size = file.bytes.len();
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .request(
                reqwest::Method::POST,
                format!("{}/integrations/Core/UploadFile", self.app_url()),
            )
            .multipart(form)
            .send()
            .await?;

        let uploaded: UploadResponse = Self::parse_response(response).await?;
        tracing::info!(file_name = %file.file_name, size, "File uploaded");
        Ok(uploaded.file_url)
    }
}
