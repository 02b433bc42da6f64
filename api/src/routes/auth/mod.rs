//! Authentication and account routes under `/api/v1/auth`:
//! - POST /register         create an account
//! - POST /token            exchange credentials for an access token
//! - POST /logout           blacklist the presented token
//! - GET  /health           service health and ledger statistics
//! - GET/PUT/DELETE /users/me and POST /users/me/change-password

pub mod health;
pub mod login;
pub mod logout;
pub mod register;
pub mod users;

use std::sync::Arc;

use tm_core::repositories::{RevocationLedger, UserRepository};
use tm_core::services::auth::AuthService;

/// Shared application state for the auth routes
pub struct AppState<U, L>
where
    U: UserRepository,
    L: RevocationLedger,
{
    pub auth_service: Arc<AuthService<U, L>>,
}

impl<U, L> AppState<U, L>
where
    U: UserRepository,
    L: RevocationLedger,
{
    pub fn new(auth_service: Arc<AuthService<U, L>>) -> Self {
        Self { auth_service }
    }
}
