use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_helpers::{AuthError, ErrorResponse};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    /// Login lookup miss. The response wording is a preserved legacy
    /// contract (see `handlers::login`).
    #[error("Email does not exist")]
    EmailNotFound,

    /// Hash mismatch or an identity with no stored hash. Reported with the
    /// same status as a lookup miss, also preserved legacy behavior.
    #[error("Password does not exist")]
    PasswordMismatch,

    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Failed to login: {0}")]
    LoginFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<AuthError> for UserError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidIdentity => {
                UserError::Validation("identity has no email address".to_string())
            }
            AuthError::Configuration(msg) => UserError::Configuration(msg),
            AuthError::InvalidToken(msg) => UserError::Internal(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        // The login failures answer in plain text with their legacy wording;
        // everything else uses the shared JSON envelope.
        match &self {
            UserError::EmailNotFound => {
                return (StatusCode::NOT_FOUND, "Email does not exist").into_response();
            }
            UserError::PasswordMismatch => {
                return (StatusCode::NOT_FOUND, "Password does not exist").into_response();
            }
            UserError::LoginFailed(message) => {
                return (StatusCode::BAD_REQUEST, format!("Failed to login: {message}"))
                    .into_response();
            }
            _ => {}
        }

        let (status, error_type, message) = match &self {
            UserError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("User {} not found", id),
            ),
            UserError::DuplicateEmail(email) => (
                StatusCode::CONFLICT,
                "duplicate",
                format!("User with email '{}' already exists", email),
            ),
            UserError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            UserError::MalformedBody(msg) => (
                StatusCode::BAD_REQUEST,
                "malformed_body",
                format!("Malformed request body: {msg}"),
            ),
            UserError::PasswordHash(msg) => {
                tracing::error!("Password hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            UserError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            UserError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            // Handled above
            UserError::EmailNotFound | UserError::PasswordMismatch | UserError::LoginFailed(_) => {
                unreachable!()
            }
        };

        (
            status,
            Json(ErrorResponse::new(error_type, message)),
        )
            .into_response()
    }
}
