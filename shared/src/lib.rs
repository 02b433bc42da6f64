//! # TextMill Shared
//!
//! Configuration types and validation helpers shared across the TextMill
//! backend crates. This crate carries no business logic; it only defines
//! the configuration surface consumed by the core, infra, and api layers.

pub mod config;
pub mod utils;
