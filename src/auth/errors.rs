//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ==================
    // Credential Errors
    // ==================

    /// Unknown username or wrong password (generic - don't leak which)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username already registered
    #[error("Username already taken")]
    UsernameTaken,

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    /// Username missing or blank
    #[error("Username is required")]
    MissingUsername,

    // ==================
    // Token Errors
    // ==================

    /// No bearer token, or a token that fails verification
    #[error("Invalid token.")]
    InvalidToken,

    /// JWT token has expired
    #[error("Token expired")]
    TokenExpired,

    // ==================
    // Internal Errors
    // ==================

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AuthError::WeakPassword(_) => 400,
            AuthError::MissingUsername => 400,

            // 401 Unauthorized
            AuthError::InvalidCredentials => 401,
            AuthError::InvalidToken => 401,
            AuthError::TokenExpired => 401,

            // 409 Conflict
            AuthError::UsernameTaken => 409,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::TokenGenerationFailed => 500,
            AuthError::StorageError(_) => 500,
        }
    }

    /// Returns whether this error should be logged at warn level
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
