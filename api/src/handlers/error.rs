//! Mapping from domain errors to HTTP responses.
//!
//! Every authentication denial is a 401 with a `WWW-Authenticate: Bearer`
//! header and a body whose `detail` distinguishes the reason: expired,
//! invalid, or invalidated by logout.

use actix_web::http::header;
use actix_web::{Error, HttpResponse};
use tracing::error;

use tm_core::errors::{AuthError, DomainError, TokenError};

use crate::dto::ErrorResponse;

/// Detail message for requests without usable credentials
pub const MISSING_CREDENTIALS_DETAIL: &str = "Could not validate credentials";

/// Build a 401 response carrying `detail` and the bearer challenge header.
pub fn unauthorized_response(detail: &str) -> HttpResponse {
    HttpResponse::Unauthorized()
        .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
        .json(ErrorResponse::new(detail))
}

/// 401 as an actix error, for use inside middleware.
pub fn unauthorized_error(detail: &str) -> Error {
    actix_web::error::InternalError::from_response(
        detail.to_string(),
        unauthorized_response(detail),
    )
    .into()
}

/// Map a domain error to its HTTP response.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new(message.as_str()))
        }
        DomainError::NotFound { resource } => {
            HttpResponse::NotFound().json(ErrorResponse::new(format!("{} not found", resource)))
        }
        DomainError::Auth(auth_error) => handle_auth_error(auth_error),
        DomainError::Token(token_error) => handle_token_error(token_error),
        DomainError::Database { message } | DomainError::Internal { message } => {
            // Internal detail stays in the logs, not in the response body.
            error!("internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
        }
    }
}

fn handle_auth_error(error: &AuthError) -> HttpResponse {
    match error {
        AuthError::IncorrectCredentials => unauthorized_response(&error.to_string()),
        AuthError::UserNotFound => HttpResponse::NotFound().json(ErrorResponse::new(error.to_string())),
        AuthError::UserAlreadyExists
        | AuthError::EmailAlreadyRegistered
        | AuthError::CurrentPasswordMismatch => {
            HttpResponse::BadRequest().json(ErrorResponse::new(error.to_string()))
        }
        AuthError::AccountDeactivated => {
            HttpResponse::Forbidden().json(ErrorResponse::new(error.to_string()))
        }
        AuthError::PasswordHashFailure => {
            error!("password hashing failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
        }
    }
}

fn handle_token_error(error: &TokenError) -> HttpResponse {
    match error {
        TokenError::TokenExpired | TokenError::InvalidToken | TokenError::TokenRevoked => {
            unauthorized_response(&error.to_string())
        }
        TokenError::RevocationUnavailable => unauthorized_response(MISSING_CREDENTIALS_DETAIL),
        TokenError::TokenGenerationFailed => {
            error!("token generation failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
        }
    }
}
