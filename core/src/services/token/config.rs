//! Configuration for the token service

use crate::domain::entities::token::DEFAULT_ACCESS_TOKEN_EXPIRY_MINUTES;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,
    /// Deny verification while the revocation store is unreachable
    /// instead of failing open
    pub strict_revocation: bool,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            access_token_expiry_minutes: DEFAULT_ACCESS_TOKEN_EXPIRY_MINUTES,
            strict_revocation: false,
        }
    }
}

impl From<&tm_shared::config::JwtConfig> for TokenServiceConfig {
    fn from(config: &tm_shared::config::JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            access_token_expiry_minutes: config.access_token_expiry_minutes,
            strict_revocation: config.strict_revocation,
        }
    }
}
