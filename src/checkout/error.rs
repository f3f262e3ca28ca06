use thiserror::Error;

use crate::draft::DraftError;

/// Failures talking to the catalog or order endpoints.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("Malformed response: {0}")]
    Decode(String),
    #[error("Order rejected: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GatewayError::Decode(e.to_string())
        } else {
            GatewayError::Transport(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Select a branch before placing the order")]
    NoBranchSelected,
    #[error("Order submission failed: {0}")]
    Submission(#[from] GatewayError),
    #[error(transparent)]
    Draft(#[from] DraftError),
}
