//! Revocation ledger interface and in-memory test double.

mod mock;
mod r#trait;

pub use mock::MockRevocationLedger;
pub use r#trait::RevocationLedger;
