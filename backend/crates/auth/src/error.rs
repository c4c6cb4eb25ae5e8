//! Auth Error Types
//!
//! Boundary error for the auth HTTP surface. Lower layers keep their own
//! error enums; this one decides status codes and the client-facing message,
//! then renders through `kernel::error::AppError`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::application::sign_up::SignUpError;
use crate::application::tokens::TokenError;
use crate::domain::validation::InvalidField;

/// Opaque error cause carried across layers
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body missing, malformed, or lacking fields
    #[error("Invalid input")]
    InvalidInput,

    /// A field failed validation
    #[error(transparent)]
    Validation(#[from] InvalidField),

    /// Email already registered
    #[error("this email is already busy")]
    EmailTaken,

    /// Any other sign-up failure
    #[error("sign up failed: {0}")]
    SignUp(#[source] SignUpError),

    /// Token signing or verification failed
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Missing, malformed, or rejected bearer token
    #[error("invalid or missing access token")]
    Unauthorized,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::SignUp(_) | AuthError::Token(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures never leak their cause to the client.
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::BadRequest => AppError::bad_request(self.to_string()),
            ErrorKind::Unauthorized => AppError::unauthorized(self.to_string()),
            ErrorKind::Conflict => AppError::conflict(self.to_string()),
            _ => AppError::internal("internal server error"),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::EmailTaken => {
                tracing::warn!("Sign up with registered email");
            }
            _ if self.kind().is_server_error() => {
                tracing::error!(error = %self, "Auth request failed");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<SignUpError> for AuthError {
    fn from(err: SignUpError) -> Self {
        match err {
            SignUpError::AlreadyExists => AuthError::EmailTaken,
            other => AuthError::SignUp(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::sign_up_options;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::InvalidInput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_is_forwarded() {
        let invalid = sign_up_options("alice_01", "nope", "correcthorsebattery").unwrap_err();
        let app = AuthError::from(invalid).to_app_error();

        assert_eq!(app.status_code(), 400);
        assert_eq!(app.message(), "email validation failed: invalid email format");
    }

    #[test]
    fn test_already_exists_becomes_email_taken() {
        let err = AuthError::from(SignUpError::AlreadyExists);
        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(err.to_app_error().message(), "this email is already busy");
    }

    #[test]
    fn test_internal_cause_is_hidden() {
        let err = AuthError::from(SignUpError::Internal("connection refused".into()));
        let app = err.to_app_error();

        assert_eq!(app.status_code(), 500);
        assert!(!app.message().contains("connection refused"));
    }

    #[test]
    fn test_token_failure_is_hidden() {
        let err = AuthError::from(TokenError::SigningFailed("signing secret is empty".into()));
        let app = err.to_app_error();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app.message(), "internal server error");
    }

    #[test]
    fn test_unauthorized_message() {
        let app = AuthError::Unauthorized.to_app_error();
        assert_eq!(app.status_code(), 401);
        assert_eq!(app.message(), "invalid or missing access token");
    }
}
