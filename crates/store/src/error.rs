/// Errors from the record store, identity and upload backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A record did not match its entity shape, e.g. an unknown status.
    #[error("Failed to decode record: {0}")]
    Decode(#[from] serde_json::Error),

    /// A payload was rejected before it reached the backend.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The access token was missing, expired or unknown.
    #[error("Invalid or expired access token")]
    Unauthorized,

    #[error("Backend configuration error: {0}")]
    Config(String),
}

impl From<validator::ValidationErrors> for StoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        StoreError::Validation(errors.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
