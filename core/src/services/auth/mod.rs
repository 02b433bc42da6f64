//! Authentication service module.
//!
//! Composes the user repository (credential store) with the token service
//! (session issuance/verification/revocation) to implement registration,
//! login, logout, and account management flows.

mod service;

#[cfg(test)]
mod tests;

pub use service::{AuthService, LoginResult};
