use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::branch_actor::BranchError;
use crate::category_actor::CategoryError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::ValidationError(_) => ApiError::BadRequest(e.to_string()),
            OrderError::InvalidBranch(_) => ApiError::Unprocessable(e.to_string()),
            OrderError::NotFound(_) => ApiError::NotFound(e.to_string()),
            OrderError::ActorCommunicationError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::ValidationError(_) => ApiError::BadRequest(e.to_string()),
            ProductError::NotFound(_) => ApiError::NotFound(e.to_string()),
            ProductError::ActorCommunicationError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<CategoryError> for ApiError {
    fn from(e: CategoryError) -> Self {
        match e {
            CategoryError::ValidationError(_) => ApiError::BadRequest(e.to_string()),
            CategoryError::NotFound(_) => ApiError::NotFound(e.to_string()),
            CategoryError::ActorCommunicationError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<BranchError> for ApiError {
    fn from(e: BranchError) -> Self {
        match e {
            BranchError::ValidationError(_) => ApiError::BadRequest(e.to_string()),
            BranchError::NotFound(_) => ApiError::NotFound(e.to_string()),
            BranchError::ActorCommunicationError(_) => ApiError::Internal(e.to_string()),
        }
    }
}
