//! HTTP-facing error type.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tasker_store::StoreError;

/// Failure returned from a handler or the category middleware.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or invalid category, path parameter, or body field.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request was well formed but the targeted task does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage fault. The detail is logged, never sent to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: &'static str,
    message: &'a str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::BadRequest(msg) | Self::NotFound(msg) => msg.as_str(),
            Self::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                "An internal error occurred"
            }
        };
        let body = ErrorBody {
            code: self.code(),
            message,
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidCategory(category) => {
                Self::BadRequest(format!("Unknown task type: {category}"))
            }
            other => Self::Internal(other.to_string()),
        }
    }
}
