//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{Claims, IssuedToken, UnverifiedClaims, DEFAULT_ACCESS_TOKEN_EXPIRY_MINUTES};
pub use user::User;
