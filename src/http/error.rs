//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::service::RoutineError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Service error, mapped per variant
    Routine(RoutineError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg)),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Routine(err) => match &err {
                RoutineError::OfferingNotFound(_) | RoutineError::RunNotFound(_) => {
                    (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", err.to_string()))
                }
                RoutineError::NotDraft { .. } | RoutineError::AlreadyCommitted(_) => (
                    StatusCode::CONFLICT,
                    ApiError::new("INVALID_STATUS", err.to_string()),
                ),
                RoutineError::CommitConflict(_) => (
                    StatusCode::CONFLICT,
                    ApiError::new("COMMIT_CONFLICT", err.to_string()),
                ),
                RoutineError::Report(_) | RoutineError::Repository(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("INTERNAL_ERROR", err.to_string()),
                ),
            },
        };

        (status, Json(error)).into_response()
    }
}

impl From<RoutineError> for AppError {
    fn from(err: RoutineError) -> Self {
        AppError::Routine(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
