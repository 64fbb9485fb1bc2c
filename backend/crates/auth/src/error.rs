//! Error taxonomy for the authentication module.

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// An active account already exists for the submitted email.
    #[error("An account with this email is already registered")]
    EmailTaken,

    /// Validation failure on user-supplied fields (password policy,
    /// malformed email, mismatched confirmation, wrong current password).
    #[error("{0}")]
    InvalidInput(String),

    /// Credentials did not match, the token was rejected, or the
    /// account is deactivated. Deliberately unspecific.
    #[error("Could not validate credentials")]
    Unauthorized,

    /// Too many failed login attempts; the account is locked until
    /// the lockout window passes.
    #[error("Account is temporarily locked, try again later")]
    Locked,

    /// No account matches the supplied identifier.
    #[error("User not found")]
    NotFound,

    /// An OTP was requested again before the resend cooldown elapsed.
    #[error("A verification code was sent recently, wait before requesting another")]
    RateLimited,

    /// The submitted one-time code does not match, was already
    /// consumed, or has expired. One variant for all three so a caller
    /// cannot probe which check failed.
    #[error("Invalid or expired verification code")]
    InvalidOrExpiredOtp,

    /// The notifier reported that it could not hand off the message.
    #[error("Could not deliver the verification code")]
    DeliveryFailed,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::InvalidInput(_) | Self::InvalidOrExpiredOtp => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Locked => StatusCode::LOCKED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::DeliveryFailed => StatusCode::BAD_GATEWAY,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmailTaken => ErrorKind::Conflict,
            Self::InvalidInput(_) | Self::InvalidOrExpiredOtp => ErrorKind::BadRequest,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Locked => ErrorKind::Locked,
            Self::NotFound => ErrorKind::NotFound,
            Self::RateLimited => ErrorKind::TooManyRequests,
            Self::DeliveryFailed => ErrorKind::BadGateway,
            Self::Database(_) | Self::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Retry hint surfaced to API clients alongside the problem body.
    pub fn action(&self) -> Option<&'static str> {
        match self {
            Self::EmailTaken => Some("Sign in instead, or use a different email."),
            Self::Locked => Some("Wait for the lockout to expire before retrying."),
            Self::RateLimited => Some("Wait before requesting another code."),
            Self::InvalidOrExpiredOtp => Some("Request a fresh verification code."),
            Self::DeliveryFailed => Some("Retry in a moment."),
            _ => None,
        }
    }

    pub fn log(&self) {
        if self.kind().is_server_error() {
            tracing::error!(error = %self, kind = %self.kind(), "auth error");
        } else {
            tracing::warn!(error = %self, kind = %self.kind(), "auth rejection");
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        // Server-side details never leave the process.
        let message = if err.kind().is_server_error() {
            "Something went wrong, please try again later".to_string()
        } else {
            err.to_string()
        };
        let mut app = AppError::new(err.kind(), message);
        if let Some(action) = err.action() {
            app = app.with_action(action);
        }
        app.with_source(err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidInput("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::Locked.status_code(), StatusCode::LOCKED);
        assert_eq!(AuthError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AuthError::InvalidOrExpiredOtp.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::DeliveryFailed.status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn server_errors_hide_detail_from_clients() {
        let app = AppError::from(AuthError::Internal("connection pool drained".into()));
        assert!(!app.message().contains("connection pool"));

        let app = AppError::from(AuthError::EmailTaken);
        assert!(app.message().contains("already registered"));
    }
}
