//! In-memory implementation of RevocationLedger for testing.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::LedgerError;

use super::r#trait::RevocationLedger;

/// Mock revocation ledger backed by a HashMap.
///
/// Entries expire lazily on lookup. The mock counts `is_revoked` calls and
/// can simulate a store outage, which tests use to assert the verifier's
/// lookup ordering and fail-open behavior.
pub struct MockRevocationLedger {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    lookup_calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl MockRevocationLedger {
    /// Create a new empty mock ledger
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            lookup_calls: AtomicUsize::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Simulate the backing store being unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `is_revoked` calls made against this ledger
    pub fn lookup_count(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), LedgerError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(LedgerError::Unavailable {
                message: "simulated outage".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl Default for MockRevocationLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationLedger for MockRevocationLedger {
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> Result<(), LedgerError> {
        self.check_available()?;

        let expires_at = Utc::now() + Duration::seconds(ttl_seconds as i64);
        let mut entries = self.entries.write().await;
        entries.insert(jti.to_string(), expires_at);
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, LedgerError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let now = Utc::now();
        let mut entries = self.entries.write().await;
        match entries.get(jti) {
            Some(expires_at) if *expires_at > now => Ok(true),
            Some(_) => {
                entries.remove(jti);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn count_revoked(&self) -> Result<usize, LedgerError> {
        self.check_available()?;

        let now = Utc::now();
        let entries = self.entries.read().await;
        Ok(entries.values().filter(|expires_at| **expires_at > now).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_revoke_and_lookup() {
        let ledger = MockRevocationLedger::new();

        ledger.revoke("jti-1", 300).await.unwrap();

        assert!(ledger.is_revoked("jti-1").await.unwrap());
        assert!(!ledger.is_revoked("jti-2").await.unwrap());
        assert_eq!(ledger.lookup_count(), 2);
        assert_eq!(ledger.count_revoked().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_dropped() {
        let ledger = MockRevocationLedger::new();

        ledger.revoke("jti-1", 0).await.unwrap();

        assert!(!ledger.is_revoked("jti-1").await.unwrap());
        assert_eq!(ledger.count_revoked().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_outage_surfaces_as_typed_error() {
        let ledger = MockRevocationLedger::new();
        ledger.set_unavailable(true);

        assert!(ledger.revoke("jti-1", 60).await.is_err());
        assert!(matches!(
            ledger.is_revoked("jti-1").await,
            Err(LedgerError::Unavailable { .. })
        ));
    }
}
