//! In-memory implementation of UserRepository for testing.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::r#trait::UserRepository;

/// Mock user repository backed by a HashMap keyed on account id.
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<u64, User>>>,
    next_id: AtomicU64,
}

impl MockUserRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn username_taken(
        &self,
        username: &str,
        exclude_id: Option<u64>,
    ) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| u.username == username && Some(u.id) != exclude_id))
    }

    async fn email_taken(
        &self,
        email: &str,
        exclude_id: Option<u64>,
    ) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| u.email.as_deref() == Some(email) && Some(u.id) != exclude_id))
    }

    async fn create(&self, mut user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(DomainError::Validation {
                message: "username already exists".to_string(),
            });
        }

        user.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: u64,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(user) => {
                if let Some(username) = username {
                    user.username = username.to_string();
                }
                if let Some(email) = email {
                    user.email = Some(email.to_string());
                }
                user.last_updated = Utc::now();
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn update_password(&self, id: u64, hashed_password: &str) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(user) => {
                user.hashed_password = hashed_password.to_string();
                user.last_updated = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn deactivate(&self, id: u64) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(user) => {
                user.deactivate();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
