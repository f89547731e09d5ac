//! Error types for the HTTP API.
//!
//! [`ApiError`] wraps controller failures and request problems and turns
//! them into a JSON `{ "error", "status" }` body via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hatchery_core::AppError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A controller workflow failed.
    #[error(transparent)]
    App(#[from] AppError),

    /// The requested creature is not in the collection.
    #[error("not found: {0}")]
    NotFound(String),

    /// A creature id in the path is not a UUID.
    #[error("invalid UUID: {0}")]
    InvalidUuid(String),

    /// The request body carried an unusable value.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A workflow task ended abnormally.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::App(err) => app_status(err),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidUuid(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

const fn app_status(err: &AppError) -> StatusCode {
    match err {
        AppError::InsufficientFunds { .. } => StatusCode::PAYMENT_REQUIRED,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::AlreadyResold(_)
        | AppError::AlreadyEvolving(_)
        | AppError::NoPendingConfirmation
        | AppError::ConfirmationOpen => StatusCode::CONFLICT,
        AppError::Generation(_) => StatusCode::BAD_GATEWAY,
        AppError::Store(_) | AppError::Economy(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
