//! Common validation utilities for account fields.
//!
//! These checks mirror the constraints enforced at the API boundary so the
//! core services can re-validate without depending on the web layer.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum username length
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum username length
pub const USERNAME_MAX_LENGTH: usize = 50;

/// Minimum password length
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Maximum password length
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Maximum email length
pub const EMAIL_MAX_LENGTH: usize = 255;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex must compile")
});

/// Check if a string is not empty after trimming
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check whether a username satisfies the length constraints
pub fn is_valid_username(username: &str) -> bool {
    let trimmed = username.trim();
    trimmed.len() >= USERNAME_MIN_LENGTH && trimmed.len() <= USERNAME_MAX_LENGTH
}

/// Check whether a password satisfies the length constraints
pub fn is_valid_password(password: &str) -> bool {
    password.len() >= PASSWORD_MIN_LENGTH && password.len() <= PASSWORD_MAX_LENGTH
}

/// Check whether an email address is plausibly well-formed
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= EMAIL_MAX_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Normalize an email for storage and comparison
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
