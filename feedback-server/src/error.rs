use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::csrf::CsrfError;

/// Request-level errors the handlers surface directly as responses.
/// Validation failures are not errors here: they re-render the form.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing session or missing/invalid anti-forgery token. Rejected
    /// before validation, with no form state echoed.
    #[error("forbidden: {0}")]
    Security(String),

    /// Missing or wrong operator token on an admin route.
    #[error("unauthorized")]
    Unauthorized,

    /// Store unavailable or insert failed; nothing was persisted.
    #[error("internal error: {0}")]
    Store(String),
}

impl From<CsrfError> for AppError {
    fn from(e: CsrfError) -> Self {
        AppError::Security(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Security(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            AppError::Security(_) => "invalid anti-forgery token",
            AppError::Unauthorized => "unauthorized",
            AppError::Store(_) => "internal server error",
        };

        (status, body).into_response()
    }
}
