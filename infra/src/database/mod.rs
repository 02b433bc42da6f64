//! MySQL database infrastructure.

pub mod mysql;

pub use mysql::MySqlUserRepository;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use tm_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Create a MySQL connection pool, retrying while the database comes up.
///
/// Containerized deployments routinely start the service before the
/// database accepts connections; a short capped-backoff loop papers over
/// that startup race.
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, InfrastructureError> {
    let max_retries = 5;
    let mut delay = 1000u64;
    let mut attempts = 0;

    loop {
        attempts += 1;

        let result = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .connect(&config.url)
            .await;

        match result {
            Ok(pool) => {
                info!("Connected to MySQL");
                return Ok(pool);
            }
            Err(e) if attempts < max_retries => {
                warn!(
                    "MySQL connection failed (attempt {}/{}): {}. Retrying in {}ms",
                    attempts, max_retries, e, delay
                );
                sleep(Duration::from_millis(delay)).await;
                delay = (delay * 2).min(10_000);
            }
            Err(e) => return Err(InfrastructureError::Database(e)),
        }
    }
}

/// Create the `users` table if it does not exist yet.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), InfrastructureError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGINT UNSIGNED PRIMARY KEY AUTO_INCREMENT,
            username VARCHAR(255) NOT NULL UNIQUE,
            email VARCHAR(255) NULL UNIQUE,
            hashed_password VARCHAR(255) NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            last_updated TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
                ON UPDATE CURRENT_TIMESTAMP,
            INDEX idx_users_username (username),
            INDEX idx_users_email (email)
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("users table ready");
    Ok(())
}
