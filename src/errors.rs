//! HTTP API error types.
//!
//! Every variant maps to one status code.  The enum implements
//! [`axum::response::IntoResponse`] so handlers can simply return
//! `Err(ApiError::NotFound { .. })`; the body is always
//! `{"detail": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::store::BookStoreError;

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable description of the failure.
    pub detail: String,
}

/// Errors a request handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is not a valid `Book`.
    #[error("{message}")]
    Validation { message: String },

    /// No book exists for the requested ISBN.
    #[error("Book with ISBN {isbn} not found")]
    NotFound { isbn: String },

    /// Catch-all for unexpected backend failures.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Return the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BookStoreError> for ApiError {
    fn from(err: BookStoreError) -> Self {
        match err {
            BookStoreError::NotFound { isbn } => ApiError::NotFound { isbn },
            BookStoreError::Backend(e) => ApiError::Internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Backend detail goes to the log, never to the caller.
        if let ApiError::Internal(ref e) = self {
            error!("Unhandled backend error: {e:#}");
        }

        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation {
                message: "x".to_string()
            }
            .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::NotFound {
                isbn: "1".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_store_error() {
        let err: ApiError = BookStoreError::NotFound {
            isbn: "42".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound { ref isbn } if isbn == "42"));
        assert_eq!(err.to_string(), "Book with ISBN 42 not found");

        let err: ApiError = BookStoreError::Backend(anyhow::anyhow!("throttled")).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_internal_message_hides_cause() {
        let err = ApiError::Internal(anyhow::anyhow!("secret table name"));
        assert_eq!(err.to_string(), "Internal server error");
    }
}
