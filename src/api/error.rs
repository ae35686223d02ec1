use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::{clients::common::ClientError, rewards::RewardError};

use super::types::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid slot number")]
    InvalidSlot(String),
    #[error("Slot is in the future")]
    FutureSlot { slot: u64, current_slot: u64 },
    #[error("Slot is too far in the future")]
    TooFarFuture { slot: u64, current_slot: u64 },
    #[error("Block not found for slot")]
    BlockNotFound(u64),
    #[error("Execution block not found")]
    ExecutionBlockNotFound(u64),
    #[error("{context}")]
    UpstreamUnavailable {
        context: &'static str,
        #[source]
        source: ClientError,
    },
    #[error("Failed to calculate block reward")]
    RewardCalculation(#[from] RewardError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn upstream(context: &'static str) -> impl FnOnce(ClientError) -> Self {
        move |source| ApiError::UpstreamUnavailable { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidSlot(_)
            | ApiError::FutureSlot { .. }
            | ApiError::TooFarFuture { .. } => StatusCode::BAD_REQUEST,
            ApiError::BlockNotFound(_) | ApiError::ExecutionBlockNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ApiError::UpstreamUnavailable { .. } | ApiError::RewardCalculation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::UpstreamUnavailable { context, source } => {
                error!(context, error = %source, "Upstream request failed")
            }
            ApiError::RewardCalculation(err) => {
                error!(error = %err, "Failed to calculate block reward")
            }
            other => warn!(error = ?other, "Request rejected"),
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}
