//! # TextMill Core
//!
//! Core business logic and domain layer for the TextMill backend.
//! This crate contains domain entities, the authentication and token
//! services, repository interfaces, and error types that form the
//! foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::token::{Claims, IssuedToken, UnverifiedClaims};
pub use domain::entities::user::User;
pub use errors::{AuthError, DomainError, DomainResult, LedgerError, TokenError};
pub use repositories::{
    MockRevocationLedger, MockUserRepository, RevocationLedger, UserRepository,
};
pub use services::{AuthService, LoginResult, TokenService, TokenServiceConfig};
