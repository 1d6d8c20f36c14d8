use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use thiserror::Error;
use tracing::error;

/// Hardware-facing errors from pin resolution and motion control.
#[derive(Debug, Error)]
pub enum MotorError {
    #[error("pin resolution failed: {0}")]
    PinResolutionFailed(String),
    #[error("pinctrl profile '{0}' is not available")]
    PinControlProfileFailed(String),
    #[error("invalid motor command code {0}")]
    InvalidCommand(u8),
    #[error("line write failed on {0}")]
    LineWriteFailed(String),
}

#[derive(Debug)]
pub enum ApiError {
    Hardware(String),
    BadRequest(String),
    Faulted(String),
    Internal(String),
}

// Implementing the Display trait allows us to convert ApiError into a string representation
impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Hardware(msg) => write!(f, "Hardware error: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Faulted(msg) => write!(f, "Chassis faulted: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

// tells axum how to convert ApiError into an HTTP response
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{}", self);
        let (status, body) = match self {
            ApiError::Hardware(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Faulted(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };
        (status, body).into_response()
    }
}
