//! Upgrade error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Reasons an upgrade is refused before the handshake
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpgradeError {
    /// No `Origin` header on the request
    #[error("Request origin missing")]
    MissingOrigin,

    /// `Origin` present but not the allowed value
    #[error("Request origin not allowed: {0}")]
    OriginMismatch(String),
}

impl UpgradeError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingOrigin | Self::OriginMismatch(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for UpgradeError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
