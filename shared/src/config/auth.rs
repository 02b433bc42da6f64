//! JWT authentication configuration

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,

    /// Algorithm for JWT signing. Pinned to HS256; kept here so the value
    /// shows up in configuration dumps, never read from request input.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// When true, verification denies tokens while the revocation store is
    /// unreachable instead of failing open.
    #[serde(default)]
    pub strict_revocation: bool,
}

impl JwtConfig {
    /// Create a new JWT configuration with a secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry_minutes: default_expiry_minutes(),
            algorithm: default_algorithm(),
            strict_revocation: false,
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Load from environment variables.
    ///
    /// `JWT_SECRET` is required; a process without it must refuse to start.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVariable {
            name: "JWT_SECRET".to_string(),
        })?;

        let access_token_expiry_minutes = match std::env::var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "JWT_ACCESS_TOKEN_EXPIRY_MINUTES".to_string(),
                value: raw,
            })?,
            Err(_) => default_expiry_minutes(),
        };

        let strict_revocation = std::env::var("JWT_STRICT_REVOCATION")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            secret,
            access_token_expiry_minutes,
            algorithm: default_algorithm(),
            strict_revocation,
        })
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_expiry_minutes() -> i64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret").with_access_expiry_minutes(15);

        assert_eq!(config.secret, "my-secret");
        assert_eq!(config.access_token_expiry_minutes, 15);
        assert_eq!(config.algorithm, "HS256");
        assert!(!config.strict_revocation);
    }

    #[test]
    fn test_from_env_requires_secret() {
        std::env::remove_var("JWT_SECRET");
        let result = JwtConfig::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::MissingVariable { ref name }) if name == "JWT_SECRET"
        ));
    }
}
