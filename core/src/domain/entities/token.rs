//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access token lifetime (30 minutes)
pub const DEFAULT_ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 30;

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID, unique per issuance. Sole key for the revocation ledger.
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token.
    ///
    /// A fresh `jti` is generated on every call, so two tokens issued for
    /// the same subject in the same instant still differ.
    pub fn new(subject: impl Into<String>, lifetime: Duration) -> Self {
        let now = Utc::now();
        let expiry = now + lifetime;

        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Remaining validity window, zero once expired
    pub fn time_until_expiration(&self) -> Duration {
        let remaining = self.exp - Utc::now().timestamp();
        if remaining > 0 {
            Duration::seconds(remaining)
        } else {
            Duration::zero()
        }
    }
}

/// A freshly issued credential together with the metadata callers need
/// for logging and response payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The signed compact JWT string
    pub token: String,

    /// The token's unique id
    pub jti: String,

    /// Timestamp after which the token is unconditionally invalid
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Seconds until expiry at the moment of issuance
    pub fn expires_in(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}

/// Claims read without signature verification.
///
/// Produced by the structural decode used for revocation. Nothing in here
/// is trusted for authorization decisions; the fields only key and bound a
/// revocation ledger entry.
#[derive(Debug, Clone, Deserialize)]
pub struct UnverifiedClaims {
    /// JWT ID, if the payload carries one
    #[serde(default)]
    pub jti: Option<String>,

    /// Expiry timestamp, if the payload carries one
    #[serde(default)]
    pub exp: Option<i64>,
}
