//! Configuration modules for the TextMill backend.
//!
//! Each sub-module owns one slice of the configuration surface. Values are
//! loaded from environment variables at process startup; nothing in here
//! re-reads the environment mid-process.

pub mod auth;
pub mod cache;
pub mod database;
pub mod server;

pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;

use thiserror::Error;

/// Errors raised while loading configuration from the environment.
///
/// These are fatal at startup: the process must not serve requests with an
/// incomplete configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {name}")]
    MissingVariable { name: String },

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}
