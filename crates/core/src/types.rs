//! Shared primitive types.

use std::fmt;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Declare a typed wrapper around an opaque store-assigned identifier.
///
/// The store hands out string ids; wrapping them keeps a `PostId` from
/// being passed where a `ClientId` is expected.
macro_rules! define_entity_id {
    ( $( $(#[$meta:meta])* $name:ident ),+ $(,)? ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
            #[serde(transparent)]
            pub struct $name(String);

            impl $name {
                pub fn new(id: impl Into<String>) -> Self {
                    Self(id.into())
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }

                pub fn into_inner(self) -> String {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<&str> for $name {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }

            impl From<String> for $name {
                fn from(value: String) -> Self {
                    Self(value)
                }
            }

            impl std::str::FromStr for $name {
                type Err = std::convert::Infallible;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Ok(Self(s.to_string()))
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }
        )+
    };
}

define_entity_id! {
    /// Identifier of a [`Client`](crate::models::client::Client).
    ClientId,
    /// Identifier of a [`Post`](crate::models::post::Post).
    PostId,
    /// Identifier of a [`Report`](crate::models::report::Report).
    ReportId,
    /// Identifier of a [`Billing`](crate::models::billing::Billing).
    BillingId,
}
