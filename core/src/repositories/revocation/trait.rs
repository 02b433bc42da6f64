//! Revocation ledger trait keyed by token id.

use async_trait::async_trait;

use crate::errors::LedgerError;

/// Expiring key-value ledger of revoked token ids.
///
/// The ledger exclusively owns revocation entries. An entry's TTL equals
/// the remaining validity window of the token at the moment of revocation,
/// so an entry never outlives the token it revokes and the ledger cannot
/// grow without bound.
///
/// Errors are typed (`LedgerError::Unavailable`) rather than swallowed:
/// the verifier decides whether a store outage fails open or closed.
#[async_trait]
pub trait RevocationLedger: Send + Sync {
    /// Record `jti` as revoked for `ttl_seconds`.
    ///
    /// Implementations must apply the write atomically (a single
    /// `SET key value EX ttl` against the backing store).
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> Result<(), LedgerError>;

    /// Check whether `jti` is currently revoked.
    async fn is_revoked(&self, jti: &str) -> Result<bool, LedgerError>;

    /// Number of live revocation entries. Observability only; never
    /// consulted for authorization decisions.
    async fn count_revoked(&self) -> Result<usize, LedgerError>;
}
