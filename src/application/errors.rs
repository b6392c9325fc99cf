use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// Application-level failure. The engine itself never produces these —
/// missing optional fields resolve to defaults — so every variant describes
/// a problem at the service boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request itself was malformed (missing/invalid parameters).
    #[error("{0}")]
    Validation(String),

    /// The requested resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// AniList (or a proxied origin) failed; surfaced opaquely to the caller.
    #[error("{0}")]
    Upstream(String),

    /// Anything else; a bug or an unexpected runtime condition.
    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        AppError::Upstream(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        AppError::Unexpected(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body for every error response: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `AppError` adapter for axum handlers. Logs server-side failures on the
/// way out; client errors pass through quietly.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        match &self.0 {
            AppError::Upstream(message) => warn!(%message, "upstream failure"),
            AppError::Unexpected(message) => error!(%message, "unexpected failure"),
            AppError::Validation(_) | AppError::NotFound(_) => {}
        }

        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
