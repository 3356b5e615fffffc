//! Authentication error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Authentication error
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Email already exists")]
    EmailExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AuthError {
    /// HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,

            Self::EmailExists => StatusCode::CONFLICT,

            Self::UserNotFound
            | Self::InvalidCredentials
            | Self::InvalidToken
            | Self::Unauthorized => StatusCode::UNAUTHORIZED,

            Self::StorageError(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    ///
    /// Unknown user and wrong password share one code so a client cannot
    /// probe which emails are registered.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::EmailExists => "email_exists",
            Self::UserNotFound | Self::InvalidCredentials => "authentication_failed",
            Self::InvalidToken => "invalid_token",
            Self::Unauthorized => "unauthorized",
            Self::StorageError(_) => "storage_error",
            Self::InternalError(_) => "server_error",
        }
    }

    /// Client-facing message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(detail) => detail.clone(),
            Self::EmailExists => "User already exists".to_string(),
            Self::UserNotFound | Self::InvalidCredentials => {
                "Invalid email or password".to_string()
            }
            Self::InvalidToken => "Invalid or expired token".to_string(),
            Self::Unauthorized => "Authentication required".to_string(),
            Self::StorageError(_) | Self::InternalError(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Self::EmailExists,
            _ => Self::StorageError(err.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("auth request failed: {}", self);
        }

        let body = Json(json!({
            "code": self.error_code(),
            "message": self.user_message(),
        }));

        (status, body).into_response()
    }
}
