use std::sync::Arc;

use socialdesk_store::http::HttpBackend;
use socialdesk_store::memory::InMemoryBackend;
use socialdesk_store::{FileUploader, IdentityProvider, RecordStore};

use crate::config::ServerConfig;

/// Shared application state available to all handlers via Axum's `State` extractor.
///
/// The record store, identity provider and upload service are separate
/// handles so each can be swapped independently, although both shipped
/// backends implement all three.
#[derive(Clone)]
pub struct AppState {
    /// Entity collections (clients, posts, reports, billings).
    pub store: Arc<dyn RecordStore>,
    /// Resolves bearer tokens to the signed-in user.
    pub identity: Arc<dyn IdentityProvider>,
    /// File upload service returning public URLs.
    pub uploader: Arc<dyn FileUploader>,
    /// Server configuration (shared, immutable after startup).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State backed by the hosted backend over HTTP.
    pub fn with_http(backend: HttpBackend, config: ServerConfig) -> Self {
        let backend = Arc::new(backend);
        Self {
            store: backend.clone(),
            identity: backend.clone(),
            uploader: backend,
            config: Arc::new(config),
        }
    }

    /// State backed by a process-local store.
    pub fn with_memory(backend: Arc<InMemoryBackend>, config: ServerConfig) -> Self {
        Self {
            store: backend.clone(),
            identity: backend.clone(),
            uploader: backend,
            config: Arc::new(config),
        }
    }
}
