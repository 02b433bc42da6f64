//! # Infrastructure Layer
//!
//! Concrete implementations of the core repository interfaces:
//!
//! - **Database**: MySQL user store using SQLx
//! - **Cache**: Redis client and the token revocation ledger
//!
//! Connections are constructed once at startup by `main` and injected into
//! the services; nothing in this crate holds global state.

/// Cache module - Redis client and the revocation ledger
pub mod cache;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
