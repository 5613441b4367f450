/**
 * Backend Error Types
 *
 * This module defines the error taxonomy of the backend server.
 * Every fallible operation in the credential store, token issuer, access
 * gate and support handlers returns `BackendError`, which converts directly
 * into an HTTP response.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `DuplicateIdentity` - registration with a name that is taken (400)
 * - `InvalidCredentials` - login name/password mismatch (401)
 * - `Unauthenticated` - any access gate rejection (401)
 * - `Validation` - missing or empty required fields (400)
 *
 * ## Server Errors
 *
 * - `StorageUnavailable` - the store could not be reached at startup
 * - `Database`, `Hashing`, `Token`, `Internal` - unexpected failures (500)
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Why the access gate rejected a request.
///
/// Each reason carries the exact message returned to the client. Signature
/// and expiry failures deliberately share one reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No bearer token could be extracted from the request
    NoToken,
    /// The token was malformed, badly signed or expired
    TokenFailed,
    /// The token was valid but its identity no longer exists
    UserNotFound,
}

impl AuthFailure {
    /// Client-facing message for this rejection
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoToken => "Not authorized, no token",
            Self::TokenFailed => "Not authorized, token failed",
            Self::UserNotFound => "Not authorized, user not found",
        }
    }
}

/// Backend-specific error types
///
/// Each variant maps to a fixed HTTP status code. Client errors carry a
/// message that is safe to return verbatim; server errors are reported as
/// "Server Error" with the underlying text attached.
#[derive(Debug, Error)]
pub enum BackendError {
    /// An identity with this name already exists
    #[error("User already exists")]
    DuplicateIdentity,

    /// Name not found or password mismatch
    ///
    /// The two cases are indistinguishable to the caller so that login
    /// cannot be used to discover which names are registered.
    #[error("Invalid name or password")]
    InvalidCredentials,

    /// Access gate rejection
    #[error("{}", .0.message())]
    Unauthenticated(AuthFailure),

    /// Missing or empty required field
    #[error("{0}")]
    Validation(String),

    /// The persistent store could not be reached
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Query failure after startup
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// bcrypt failed to hash or compare
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Token could not be signed
    #[error("Token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Anything else unexpected (e.g. a panicked blocking task)
    #[error("{0}")]
    Internal(String),
}

impl BackendError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `DuplicateIdentity`, `Validation` - 400 Bad Request
    /// - `InvalidCredentials`, `Unauthenticated` - 401 Unauthorized
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DuplicateIdentity | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::StorageUnavailable(_)
            | Self::Database(_)
            | Self::Hashing(_)
            | Self::Token(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error is the client's fault
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::DuplicateIdentity.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BackendError::validation("Invalid user data").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BackendError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            BackendError::Unauthenticated(AuthFailure::TokenFailed).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BackendError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            BackendError::StorageUnavailable("refused".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_gate_failures_share_status() {
        for failure in [AuthFailure::NoToken, AuthFailure::TokenFailed, AuthFailure::UserNotFound] {
            assert_eq!(
                BackendError::Unauthenticated(failure).status_code(),
                StatusCode::UNAUTHORIZED
            );
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(BackendError::DuplicateIdentity.message(), "User already exists");
        assert_eq!(BackendError::InvalidCredentials.message(), "Invalid name or password");
        assert_eq!(
            BackendError::Unauthenticated(AuthFailure::NoToken).message(),
            "Not authorized, no token"
        );
        assert_eq!(
            BackendError::Unauthenticated(AuthFailure::UserNotFound).message(),
            "Not authorized, user not found"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(BackendError::DuplicateIdentity.is_client_error());
        assert!(BackendError::Unauthenticated(AuthFailure::NoToken).is_client_error());
        assert!(!BackendError::internal("boom").is_client_error());
    }
}
