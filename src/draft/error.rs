use thiserror::Error;

/// Failures of the persisted-draft backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Draft storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Draft serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised by cart mutations.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("No cart line for product: {0}")]
    LineNotFound(String),
    #[error("Invalid cart quantity: {0} (minimum is 1)")]
    InvalidQuantity(i64),
    #[error(transparent)]
    Store(#[from] StoreError),
}
