//! Mapping of service errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::validation::ValidationError;
use crate::context::ContextError;

/// Error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
    pub error_code: &'static str,
}

/// Errors surfaced by API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Context(#[from] ContextError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Context(ContextError::AppNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Context(ContextError::Database(_)) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Context(ContextError::AppNotFound { .. }) => "TABLE_NOT_FOUND",
            ApiError::Context(ContextError::Database(_)) => "DB_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match &self {
            ApiError::Validation(e) => {
                tracing::info!(error = %e, "Rejected request");
                e.to_string()
            }
            ApiError::Context(e @ ContextError::AppNotFound { .. }) => {
                tracing::info!(error = %e, "Table not found");
                e.to_string()
            }
            // Internal details stay in the log.
            ApiError::Context(e @ ContextError::Database(_)) => {
                tracing::error!(error = %e, "Database error");
                "Database service unavailable".to_string()
            }
        };

        let body = ErrorBody {
            detail,
            error_code: self.error_code(),
        };
        (self.status(), Json(body)).into_response()
    }
}
