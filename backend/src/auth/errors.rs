//! Custom error types specific to authentication failures.
//!
//! Credential failures answer `404` with one fixed message so a caller cannot
//! tell a wrong username from a wrong password. Token failures answer `401`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,
    #[error("Authorization token required")]
    MissingToken,
    #[error("Authorization header must use the Bearer scheme")]
    MalformedHeader,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    ExpiredToken,
    #[error("Token signed with an unknown key")]
    UnknownKey,
    #[error("Failed to create token: {0}")]
    TokenCreation(String),
    #[error("Credential store unavailable: {0}")]
    Store(#[from] adapters::AdapterError),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::NOT_FOUND,
            AuthError::MissingToken
            | AuthError::MalformedHeader
            | AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::UnknownKey => StatusCode::UNAUTHORIZED,
            AuthError::TokenCreation(_) | AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!("authentication fault: {}", self);
            "Internal server error".to_string()
        } else {
            warn!("authentication rejected: {}", self);
            self.to_string()
        };
        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}
