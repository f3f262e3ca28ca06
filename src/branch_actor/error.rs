use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during branch operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BranchError {
    #[error("Branch not found: {0}")]
    NotFound(String),
    #[error("Branch validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for BranchError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => BranchError::NotFound(id),
            FrameworkError::Rejected(msg) => BranchError::ValidationError(msg),
            other => BranchError::ActorCommunicationError(other.to_string()),
        }
    }
}
