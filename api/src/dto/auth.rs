//! Authentication endpoint request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use tm_core::domain::entities::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,

    #[validate(email)]
    pub email: Option<String>,
}

/// Credentials posted as a urlencoded form, password-grant style.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    /// Account the token was issued for
    pub user_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: u64,
    pub username: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,

    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 6, max = 128))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            username: "alice".to_string(),
            password: "secret1".to_string(),
            email: Some("alice@example.com".to_string()),
        };
        assert!(valid.validate().is_ok());

        let short_username = RegisterRequest {
            username: "ab".to_string(),
            password: "secret1".to_string(),
            email: None,
        };
        assert!(short_username.validate().is_err());

        let bad_email = RegisterRequest {
            username: "alice".to_string(),
            password: "secret1".to_string(),
            email: Some("not-an-email".to_string()),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_update_profile_allows_partial_updates() {
        let only_email = UpdateProfileRequest {
            username: None,
            email: Some("new@example.com".to_string()),
        };
        assert!(only_email.validate().is_ok());

        let nothing = UpdateProfileRequest {
            username: None,
            email: None,
        };
        assert!(nothing.validate().is_ok());
    }
}
