//! User entity backing the account store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account.
///
/// `id` is assigned by the database; entities built in memory before
/// insertion carry `id = 0` until persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database-assigned account id
    pub id: u64,

    /// Unique login name
    pub username: String,

    /// Optional unique email address
    pub email: Option<String>,

    /// bcrypt hash of the password, never the plaintext
    pub hashed_password: String,

    /// Soft-delete flag; inactive accounts cannot log in
    pub is_active: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last profile or password change
    pub last_updated: DateTime<Utc>,
}

impl User {
    /// Creates a new, not-yet-persisted user
    pub fn new(username: impl Into<String>, email: Option<String>, hashed_password: String) -> Self {
        let now = Utc::now();

        Self {
            id: 0,
            username: username.into(),
            email,
            hashed_password,
            is_active: true,
            created_at: now,
            last_updated: now,
        }
    }

    /// Marks the account as deactivated (soft delete)
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.last_updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_active() {
        let user = User::new("alice", None, "hash".to_string());

        assert_eq!(user.id, 0);
        assert_eq!(user.username, "alice");
        assert!(user.is_active);
    }

    #[test]
    fn test_deactivate() {
        let mut user = User::new("bob", Some("bob@example.com".to_string()), "hash".to_string());
        user.deactivate();

        assert!(!user.is_active);
    }
}
