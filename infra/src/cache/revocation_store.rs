//! Redis implementation of the token revocation ledger.
//!
//! Each revoked token id is stored under `blacklist:jwt:{jti}` with a TTL
//! equal to the token's remaining validity, so Redis itself expires the
//! entry no later than the token would have expired anyway.

use async_trait::async_trait;

use tm_core::errors::LedgerError;
use tm_core::repositories::RevocationLedger;

use super::redis_client::RedisClient;

/// Key namespace for revocation entries
const BLACKLIST_KEY_PREFIX: &str = "blacklist:jwt:";

/// Revocation ledger backed by Redis.
///
/// Stateless apart from the shared connection handle; errors are surfaced
/// as `LedgerError::Unavailable` and the fail-open/fail-closed decision is
/// left to the verifier.
pub struct RedisRevocationLedger {
    client: RedisClient,
    key_prefix: Option<String>,
}

impl RedisRevocationLedger {
    /// Create a new ledger over an established Redis client
    pub fn new(client: RedisClient) -> Self {
        Self {
            client,
            key_prefix: None,
        }
    }

    /// Apply an additional service-wide key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }
}

fn entry_key(key_prefix: Option<&str>, jti: &str) -> String {
    format!("{}{}{}", key_prefix.unwrap_or(""), BLACKLIST_KEY_PREFIX, jti)
}

fn entry_pattern(key_prefix: Option<&str>) -> String {
    format!("{}{}*", key_prefix.unwrap_or(""), BLACKLIST_KEY_PREFIX)
}

#[async_trait]
impl RevocationLedger for RedisRevocationLedger {
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> Result<(), LedgerError> {
        let key = entry_key(self.key_prefix.as_deref(), jti);
        self.client
            .set_with_expiry(&key, "1", ttl_seconds)
            .await
            .map_err(|e| LedgerError::Unavailable {
                message: e.to_string(),
            })
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, LedgerError> {
        let key = entry_key(self.key_prefix.as_deref(), jti);
        self.client
            .exists(&key)
            .await
            .map_err(|e| LedgerError::Unavailable {
                message: e.to_string(),
            })
    }

    async fn count_revoked(&self) -> Result<usize, LedgerError> {
        let pattern = entry_pattern(self.key_prefix.as_deref());
        self.client
            .keys(&pattern)
            .await
            .map(|keys| keys.len())
            .map_err(|e| LedgerError::Unavailable {
                message: e.to_string(),
            })
    }
}
