//! Revocation ledger composition tests

use std::sync::Arc;

use chrono::Duration;

use crate::errors::{DomainError, TokenError};
use crate::repositories::{MockRevocationLedger, RevocationLedger};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service_with(
    strict_revocation: bool,
) -> (Arc<MockRevocationLedger>, TokenService<MockRevocationLedger>) {
    let ledger = Arc::new(MockRevocationLedger::new());
    let config = TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        access_token_expiry_minutes: 30,
        strict_revocation,
    };
    let service = TokenService::new(Arc::clone(&ledger), config).unwrap();
    (ledger, service)
}

#[tokio::test]
async fn test_revoked_token_stays_revoked() {
    let (_, service) = service_with(false);

    let issued = service.issue_token("7", Some(Duration::minutes(5))).unwrap();
    assert!(service.revoke_token(&issued.token).await.unwrap());

    let result = service.verify_token(&issued.token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));

    // Still revoked on a second look.
    let result = service.verify_token(&issued.token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_revocation_is_per_token_not_per_subject() {
    let (_, service) = service_with(false);

    let first = service.issue_token("7", Some(Duration::minutes(5))).unwrap();
    let second = service.issue_token("7", Some(Duration::minutes(5))).unwrap();

    service.revoke_token(&first.token).await.unwrap();

    assert!(matches!(
        service.verify_token(&first.token).await,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
    let claims = service.verify_token(&second.token).await.unwrap();
    assert_eq!(claims.sub, "7");
}

#[tokio::test]
async fn test_revoking_expired_token_writes_no_entry() {
    let (ledger, service) = service_with(false);

    let issued = service.issue_token("7", Some(Duration::zero())).unwrap();

    // Already expired: reported as done, but nothing stored.
    assert!(service.revoke_token(&issued.token).await.unwrap());
    assert_eq!(ledger.count_revoked().await.unwrap(), 0);
}

#[tokio::test]
async fn test_ledger_entry_ttl_tracks_remaining_validity() {
    let (ledger, service) = service_with(false);

    let issued = service.issue_token("7", Some(Duration::minutes(5))).unwrap();
    service.revoke_token(&issued.token).await.unwrap();

    assert!(ledger.is_revoked(&issued.jti).await.unwrap());
    assert_eq!(ledger.count_revoked().await.unwrap(), 1);
}

#[tokio::test]
async fn test_revoke_unparseable_token_reports_false() {
    let (ledger, service) = service_with(false);

    assert!(!service.revoke_token("not-a-jwt").await.unwrap());
    assert_eq!(ledger.count_revoked().await.unwrap(), 0);
}

#[tokio::test]
async fn test_revoke_with_store_down_reports_false() {
    let (ledger, service) = service_with(false);
    ledger.set_unavailable(true);

    let issued = service.issue_token("7", Some(Duration::minutes(5))).unwrap();
    assert!(!service.revoke_token(&issued.token).await.unwrap());
}

#[tokio::test]
async fn test_verification_fails_open_on_store_outage() {
    let (ledger, service) = service_with(false);

    let issued = service.issue_token("7", Some(Duration::minutes(5))).unwrap();
    ledger.set_unavailable(true);

    let claims = service.verify_token(&issued.token).await.unwrap();
    assert_eq!(claims.sub, "7");
}

#[tokio::test]
async fn test_verification_fails_closed_when_configured() {
    let (ledger, service) = service_with(true);

    let issued = service.issue_token("7", Some(Duration::minutes(5))).unwrap();
    ledger.set_unavailable(true);

    let result = service.verify_token(&issued.token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RevocationUnavailable))
    ));
}

#[tokio::test]
async fn test_no_ledger_lookup_for_bad_signatures() {
    let (ledger, service) = service_with(false);

    let issued = service.issue_token("7", Some(Duration::minutes(5))).unwrap();
    let mut tampered = issued.token.clone();
    tampered.pop();

    let result = service.verify_token(&tampered).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
    assert_eq!(
        ledger.lookup_count(),
        0,
        "signature failures must not reach the revocation store"
    );
}

#[tokio::test]
async fn test_no_ledger_lookup_for_expired_tokens() {
    let (ledger, service) = service_with(false);

    let issued = service.issue_token("7", Some(Duration::zero())).unwrap();
    let _ = service.verify_token(&issued.token).await;

    assert_eq!(ledger.lookup_count(), 0);
}

#[tokio::test]
async fn test_revoked_count_surfaces_live_entries() {
    let (_, service) = service_with(false);

    let a = service.issue_token("7", Some(Duration::minutes(5))).unwrap();
    let b = service.issue_token("8", Some(Duration::minutes(5))).unwrap();
    service.revoke_token(&a.token).await.unwrap();
    service.revoke_token(&b.token).await.unwrap();

    assert_eq!(service.revoked_token_count().await.unwrap(), 2);
}
