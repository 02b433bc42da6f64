//! Error type definitions for authentication and token management.
//!
//! User-facing messages are mapped in the presentation layer; these enums
//! carry the machine-readable distinction between failure modes.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    IncorrectCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Username already registered")]
    UserAlreadyExists,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Account deactivated")]
    AccountDeactivated,

    #[error("Current password is incorrect")]
    CurrentPasswordMismatch,

    #[error("Password hashing failed")]
    PasswordHashFailure,
}

/// Token verification and issuance errors.
///
/// `TokenExpired`, `InvalidToken`, and `TokenRevoked` are the three denial
/// outcomes of verification; all deny access, and only the user-facing
/// message differs.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has been invalidated")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Revocation store unavailable")]
    RevocationUnavailable,
}

/// Revocation ledger errors.
///
/// Typed rather than swallowed so the caller chooses fail-open or
/// fail-closed; the store itself never decides that policy.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Revocation store unavailable: {message}")]
    Unavailable { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denial_messages() {
        assert_eq!(TokenError::TokenExpired.to_string(), "Token has expired");
        assert_eq!(TokenError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(
            TokenError::TokenRevoked.to_string(),
            "Token has been invalidated"
        );
    }

    #[test]
    fn test_ledger_error_message() {
        let err = LedgerError::Unavailable {
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("connection refused"));
    }
}
