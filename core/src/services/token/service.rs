//! Main token service implementation.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, info, warn};

use crate::domain::entities::token::{Claims, IssuedToken};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationLedger;

use super::config::TokenServiceConfig;
use super::peek::decode_unverified;

/// Signing algorithm, pinned at compile time. Never read from a
/// presented token or any other attacker-controlled input.
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Service for issuing, verifying, and revoking JWT access tokens.
///
/// Issuance and verification are stateless and safe to run concurrently;
/// the only shared mutable resource is the revocation ledger behind the
/// injected handle.
pub struct TokenService<L: RevocationLedger> {
    ledger: Arc<L>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<L: RevocationLedger> TokenService<L> {
    /// Creates a new token service instance.
    ///
    /// Fails when the signing secret is empty. That is a configuration
    /// error, fatal at startup, never a per-request condition.
    pub fn new(ledger: Arc<L>, config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Internal {
                message: "JWT signing secret is not configured".to_string(),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        // The expiry boundary is exact; the default 60s leeway would let
        // freshly expired tokens through.
        validation.leeway = 0;

        Ok(Self {
            ledger,
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Default access token lifetime from configuration
    fn default_lifetime(&self) -> Duration {
        Duration::minutes(self.config.access_token_expiry_minutes)
    }

    /// Issues a signed access token for `subject`.
    ///
    /// Pure apart from clock and randomness: no I/O, no side effects.
    /// Every call generates a fresh `jti`, so concurrent issuance for the
    /// same subject still yields distinct revocation keys.
    pub fn issue_token(
        &self,
        subject: &str,
        lifetime: Option<Duration>,
    ) -> Result<IssuedToken, DomainError> {
        if subject.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "token subject must not be empty".to_string(),
            });
        }

        let claims = Claims::new(subject, lifetime.unwrap_or_else(|| self.default_lifetime()));
        let token = encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or_else(|| DomainError::Internal {
                message: "issued token has an unrepresentable expiry".to_string(),
            })?;

        debug!(jti = %claims.jti, %expires_at, "issued access token");

        Ok(IssuedToken {
            token,
            jti: claims.jti,
            expires_at,
        })
    }

    /// Verifies a presented token and returns its claims.
    ///
    /// Terminal outcomes, in evaluation order:
    /// 1. malformed or bad signature         -> `InvalidToken`
    /// 2. past its expiry                    -> `TokenExpired`
    /// 3. empty subject claim                -> `InvalidToken`
    /// 4. present in the revocation ledger   -> `TokenRevoked`
    /// 5. otherwise                          -> `Ok(claims)`
    ///
    /// Signature validation strictly precedes the ledger lookup: a token
    /// that does not verify never reaches the store, so an attacker can
    /// neither force ledger I/O nor distinguish invalid from revoked.
    ///
    /// A ledger outage fails open (logged here, since it masks a
    /// capability) unless `strict_revocation` is configured.
    pub async fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    DomainError::Token(TokenError::TokenExpired)
                } else {
                    DomainError::Token(TokenError::InvalidToken)
                }
            })?;
        let claims = token_data.claims;

        // jsonwebtoken treats exp == now as still valid; the expiry
        // boundary here is inclusive.
        if claims.is_expired() {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }

        if claims.sub.trim().is_empty() {
            return Err(DomainError::Token(TokenError::InvalidToken));
        }

        match self.ledger.is_revoked(&claims.jti).await {
            Ok(true) => Err(DomainError::Token(TokenError::TokenRevoked)),
            Ok(false) => Ok(claims),
            Err(e) if self.config.strict_revocation => {
                warn!(error = %e, "revocation store unreachable, failing closed");
                Err(DomainError::Token(TokenError::RevocationUnavailable))
            }
            Err(e) => {
                warn!(error = %e, "revocation store unreachable, allowing token");
                Ok(claims)
            }
        }
    }

    /// Revokes a presented token by writing its `jti` to the ledger.
    ///
    /// The claims are read with a structural decode, intentionally without
    /// signature verification; see [`decode_unverified`]. The entry's TTL
    /// is the token's remaining validity window, so the ledger entry never
    /// outlives the token and never expires before it would have.
    ///
    /// Returns `false` (not an error) when no `jti` can be extracted or
    /// the store is unavailable; revocation is best-effort and the caller
    /// decides whether that is acceptable.
    pub async fn revoke_token(&self, token: &str) -> Result<bool, DomainError> {
        let Some(claims) = decode_unverified(token) else {
            warn!("cannot revoke: token is not structurally a JWT");
            return Ok(false);
        };
        let Some(jti) = claims.jti else {
            warn!("cannot revoke: token carries no jti");
            return Ok(false);
        };

        let ttl_seconds = match claims.exp {
            Some(exp) => {
                let remaining = exp - Utc::now().timestamp();
                if remaining <= 0 {
                    debug!(%jti, "token already expired, nothing to revoke");
                    return Ok(true);
                }
                remaining as u64
            }
            // Unreadable expiry: retain for the configured default
            // lifetime rather than skipping the entry.
            None => (self.config.access_token_expiry_minutes * 60).max(0) as u64,
        };

        match self.ledger.revoke(&jti, ttl_seconds).await {
            Ok(()) => {
                info!(%jti, ttl_seconds, "token revoked");
                Ok(true)
            }
            Err(e) => {
                warn!(%jti, error = %e, "revocation store unreachable, token not blacklisted");
                Ok(false)
            }
        }
    }

    /// Number of live revocation entries, for observability endpoints.
    pub async fn revoked_token_count(&self) -> Result<usize, DomainError> {
        self.ledger
            .count_revoked()
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("failed to read revocation stats: {}", e),
            })
    }
}
