//! Token service module for JWT session management.
//!
//! This module handles all token-related operations:
//! - Access token issuance (signed, time-bounded, unique `jti`)
//! - Stateless verification composed with the revocation ledger
//! - Revocation (blacklisting) with TTL bounded by the token's own expiry
//! - Structural claim extraction for revocation keys

mod config;
mod peek;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use peek::decode_unverified;
pub use service::TokenService;
