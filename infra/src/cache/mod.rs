//! Redis-backed cache infrastructure.

pub mod redis_client;
pub mod revocation_store;

pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationLedger;
