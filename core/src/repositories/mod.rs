//! Repository interfaces for persistence collaborators.

pub mod revocation;
pub mod user;

pub use revocation::{MockRevocationLedger, RevocationLedger};
pub use user::{MockUserRepository, UserRepository};
