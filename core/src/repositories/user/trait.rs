//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations.
///
/// Implementations back this with the relational user store. Uniqueness of
/// `username` and `email` is enforced here, not in the services.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their login name
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their account id
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError>;

    /// Check whether a username is taken by any account other than
    /// `exclude_id` (pass `None` for registration checks)
    async fn username_taken(
        &self,
        username: &str,
        exclude_id: Option<u64>,
    ) -> Result<bool, DomainError>;

    /// Check whether an email is registered to any account other than
    /// `exclude_id`
    async fn email_taken(&self, email: &str, exclude_id: Option<u64>)
        -> Result<bool, DomainError>;

    /// Persist a new user and return it with its database-assigned id
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update username and/or email for an account, returning the updated
    /// entity
    ///
    /// # Returns
    /// * `Ok(Some(User))` - Account updated
    /// * `Ok(None)` - No account with that id
    async fn update_profile(
        &self,
        id: u64,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, DomainError>;

    /// Replace the stored password hash for an account
    async fn update_password(&self, id: u64, hashed_password: &str) -> Result<bool, DomainError>;

    /// Soft-delete an account by clearing its active flag
    async fn deactivate(&self, id: u64) -> Result<bool, DomainError>;
}
