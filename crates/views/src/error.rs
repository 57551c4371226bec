use socialdesk_core::error::CoreError;
use socialdesk_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Load cancelled")]
    Cancelled,

    /// The signed-in user has no client record linked to their email.
    #[error("No client linked to {email}")]
    NoLinkedClient { email: String },
}

pub type ViewResult<T> = Result<T, ViewError>;
