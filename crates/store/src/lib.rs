//! Access to the hosted backend that owns records, identity and files.
//!
//! The contracts in [`contracts`] are object-safe so the server can hold any
//! backend behind an `Arc<dyn _>`. [`http::HttpBackend`] talks to the hosted
//! REST API; [`memory::InMemoryBackend`] keeps everything in process.

pub mod contracts;
pub mod entity;
pub mod error;
pub mod http;
pub mod memory;
pub mod query;

pub use contracts::{FileUploader, IdentityProvider, RecordStore, UploadFile};
pub use entity::{records, Entity, Records};
pub use error::{StoreError, StoreResult};
pub use query::{Filter, ListQuery, SortKey};
