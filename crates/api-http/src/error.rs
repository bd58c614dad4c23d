//! HTTP Error Types
//!
//! Maps application errors to status codes and the `{success: false, error}` body.

use crate::types::ErrorReply;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;
use waitline_core::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Route does not exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Anything the client cannot fix (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = ErrorReply {
            success: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
