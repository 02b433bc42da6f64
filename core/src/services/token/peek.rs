//! Structural (unverified) claim extraction.
//!
//! Revocation needs the `jti` and `exp` of a token whose signature path is
//! deliberately bypassed for this one administrative action. This decode is
//! NOT a trust boundary: the extracted values only key and bound a ledger
//! entry, and are never used for authorization decisions.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::domain::entities::token::UnverifiedClaims;

/// Decode a token's payload without checking its signature or expiry.
///
/// Returns `None` when the string is not a structurally valid JWT at all.
pub fn decode_unverified(token: &str) -> Option<UnverifiedClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    // The key is never consulted with signature validation disabled.
    let key = DecodingKey::from_secret(&[]);

    jsonwebtoken::decode::<UnverifiedClaims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};

    use crate::domain::entities::token::Claims;

    fn signed_token(secret: &str) -> (Claims, String) {
        let claims = Claims::new("42", Duration::minutes(5));
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();
        (claims, token)
    }

    #[test]
    fn test_extracts_jti_and_exp() {
        let (claims, token) = signed_token("secret");
        let peeked = decode_unverified(&token).unwrap();

        assert_eq!(peeked.jti.as_deref(), Some(claims.jti.as_str()));
        assert_eq!(peeked.exp, Some(claims.exp));
    }

    #[test]
    fn test_signature_is_not_checked() {
        let (claims, token) = signed_token("secret");
        let mut tampered = token;
        tampered.push('x');

        let peeked = decode_unverified(&tampered).unwrap();
        assert_eq!(peeked.jti.as_deref(), Some(claims.jti.as_str()));
    }

    #[test]
    fn test_garbage_yields_none() {
        assert!(decode_unverified("not-a-jwt").is_none());
        assert!(decode_unverified("").is_none());
        assert!(decode_unverified("a.b").is_none());
    }
}
