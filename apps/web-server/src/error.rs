//! Server error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use record_store::RecordStoreError;

use crate::routes::redirect;

/// Server error type.
///
/// Validation failures and duplicate tenant names are not represented here:
/// they re-render the submitting form with a message and HTTP 200. This type
/// covers the responses that leave the form flow entirely.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Session absent or invalid on a protected route.
    #[error("authentication required")]
    Unauthorized,

    /// Unknown route or missing static file.
    #[error("not found")]
    NotFound,

    /// Record store failure.
    #[error("store error: {0}")]
    Store(#[from] RecordStoreError),

    /// Template rendering failure.
    #[error("template error: {0}")]
    Render(#[from] tera::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Never an error page: unauthenticated users go to the login form.
            AppError::Unauthorized => redirect("/login"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            AppError::Store(e) => {
                tracing::error!(error = %e, "Record store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            AppError::Render(e) => {
                tracing::error!(error = %e, "Template rendering failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

/// Result type alias for handler operations.
pub type AppResult<T> = Result<T, AppError>;
