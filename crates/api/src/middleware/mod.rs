//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the signed-in user from a Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the agency `admin` role.

pub mod auth;
pub mod rbac;
