//! Main authentication service implementation

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::token::IssuedToken;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{RevocationLedger, UserRepository};
use crate::services::token::TokenService;

use tm_shared::utils::validation;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Account id of the authenticated user
    pub user_id: u64,
    /// The issued access token
    pub token: IssuedToken,
}

/// Authentication service for the complete account and session flow
pub struct AuthService<U, L>
where
    U: UserRepository,
    L: RevocationLedger,
{
    /// User repository for credential and profile persistence
    user_repository: Arc<U>,
    /// Token service for JWT session management
    token_service: Arc<TokenService<L>>,
}

impl<U, L> AuthService<U, L>
where
    U: UserRepository,
    L: RevocationLedger,
{
    /// Create a new authentication service
    pub fn new(user_repository: Arc<U>, token_service: Arc<TokenService<L>>) -> Self {
        Self {
            user_repository,
            token_service,
        }
    }

    /// Access to the underlying token service (used by the HTTP middleware)
    pub fn token_service(&self) -> &Arc<TokenService<L>> {
        &self.token_service
    }

    /// Register a new account.
    ///
    /// Username and email uniqueness are checked before the password is
    /// hashed, so duplicate registrations fail fast.
    pub async fn register(
        &self,
        username: &str,
        email: Option<&str>,
        password: &str,
    ) -> DomainResult<User> {
        let username = username.trim();
        if !validation::is_valid_username(username) {
            return Err(DomainError::Validation {
                message: format!(
                    "username must be between {} and {} characters",
                    validation::USERNAME_MIN_LENGTH,
                    validation::USERNAME_MAX_LENGTH
                ),
            });
        }
        if !validation::is_valid_password(password) {
            return Err(DomainError::Validation {
                message: format!(
                    "password must be between {} and {} characters",
                    validation::PASSWORD_MIN_LENGTH,
                    validation::PASSWORD_MAX_LENGTH
                ),
            });
        }

        let email = match email {
            Some(raw) => {
                if !validation::is_valid_email(raw) {
                    return Err(DomainError::Validation {
                        message: "invalid email format".to_string(),
                    });
                }
                Some(validation::normalize_email(raw))
            }
            None => None,
        };

        if self.user_repository.username_taken(username, None).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }
        if let Some(ref email) = email {
            if self.user_repository.email_taken(email, None).await? {
                return Err(AuthError::EmailAlreadyRegistered.into());
            }
        }

        let hashed = hash_password(password)?;
        let user = self
            .user_repository
            .create(User::new(username, email, hashed))
            .await?;

        info!(user_id = user.id, "registered new account");
        Ok(user)
    }

    /// Authenticate a user and issue an access token.
    ///
    /// Unknown username and wrong password produce the same error, so a
    /// caller cannot probe which usernames exist.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginResult> {
        let user = self
            .user_repository
            .find_by_username(username.trim())
            .await?
            .ok_or(AuthError::IncorrectCredentials)?;

        if !verify_password(password, &user.hashed_password)? {
            return Err(AuthError::IncorrectCredentials.into());
        }

        if !user.is_active {
            return Err(AuthError::AccountDeactivated.into());
        }

        let token = self.token_service.issue_token(&user.id.to_string(), None)?;

        info!(user_id = user.id, jti = %token.jti, "login succeeded");
        Ok(LoginResult {
            user_id: user.id,
            token,
        })
    }

    /// Log out by blacklisting the presented token.
    ///
    /// Best-effort: returns `false` when the revocation entry could not be
    /// written (store down, token unreadable). The caller reports logout
    /// as completed either way.
    pub async fn logout(&self, token: &str) -> DomainResult<bool> {
        let blacklisted = self.token_service.revoke_token(token).await?;
        if !blacklisted {
            warn!("logout completed without a blacklist entry");
        }
        Ok(blacklisted)
    }

    /// Fetch the profile of an authenticated user
    pub async fn profile(&self, user_id: u64) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Update username and/or email, re-checking uniqueness against other
    /// accounts
    pub async fn update_profile(
        &self,
        user_id: u64,
        username: Option<&str>,
        email: Option<&str>,
    ) -> DomainResult<User> {
        let username = username.map(str::trim);
        if let Some(username) = username {
            if !validation::is_valid_username(username) {
                return Err(DomainError::Validation {
                    message: "invalid username".to_string(),
                });
            }
            if self
                .user_repository
                .username_taken(username, Some(user_id))
                .await?
            {
                return Err(AuthError::UserAlreadyExists.into());
            }
        }

        let email = match email {
            Some(raw) => {
                if !validation::is_valid_email(raw) {
                    return Err(DomainError::Validation {
                        message: "invalid email format".to_string(),
                    });
                }
                let normalized = validation::normalize_email(raw);
                if self
                    .user_repository
                    .email_taken(&normalized, Some(user_id))
                    .await?
                {
                    return Err(AuthError::EmailAlreadyRegistered.into());
                }
                Some(normalized)
            }
            None => None,
        };

        self.user_repository
            .update_profile(user_id, username, email.as_deref())
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Change an account's password after verifying the current one
    pub async fn change_password(
        &self,
        user_id: u64,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user = self.profile(user_id).await?;

        if !verify_password(current_password, &user.hashed_password)? {
            return Err(AuthError::CurrentPasswordMismatch.into());
        }
        if !validation::is_valid_password(new_password) {
            return Err(DomainError::Validation {
                message: "invalid new password".to_string(),
            });
        }

        let hashed = hash_password(new_password)?;
        self.user_repository
            .update_password(user_id, &hashed)
            .await?;

        info!(user_id, "password changed");
        Ok(())
    }

    /// Soft-delete an account
    pub async fn deactivate(&self, user_id: u64) -> DomainResult<()> {
        if !self.user_repository.deactivate(user_id).await? {
            return Err(AuthError::UserNotFound.into());
        }
        info!(user_id, "account deactivated");
        Ok(())
    }
}

/// Hash a plaintext password with bcrypt.
///
/// The cost factor is bcrypt's default; tuning it is a deployment concern,
/// not a per-call decision.
fn hash_password(password: &str) -> DomainResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|_| AuthError::PasswordHashFailure.into())
}

/// Verify a plaintext password against a stored bcrypt hash
fn verify_password(password: &str, hashed: &str) -> DomainResult<bool> {
    bcrypt::verify(password, hashed).map_err(|_| AuthError::PasswordHashFailure.into())
}
