//! Domain models and view aggregation for the SocialDesk agency dashboard.
//!
//! The `core` crate contains no IO. Entity collections are fetched by the
//! caller and passed in; every function here derives a view from them.

pub mod calendar;
pub mod client_index;
pub mod comments;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod filter;
pub mod financial;
pub mod media;
pub mod metrics;
pub mod models;
pub mod roles;
pub mod status;
pub mod types;
