//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use tm_core::domain::entities::user::User;
use tm_core::errors::DomainError;
use tm_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        Ok(User {
            id: row
                .try_get("id")
                .map_err(|e| db_error("id", e))?,
            username: row
                .try_get("username")
                .map_err(|e| db_error("username", e))?,
            email: row.try_get("email").map_err(|e| db_error("email", e))?,
            hashed_password: row
                .try_get("hashed_password")
                .map_err(|e| db_error("hashed_password", e))?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| db_error("is_active", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("created_at", e))?,
            last_updated: row
                .try_get::<DateTime<Utc>, _>("last_updated")
                .map_err(|e| db_error("last_updated", e))?,
        })
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("Failed to read {}: {}", context, e),
    }
}

fn query_error(e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("Database query failed: {}", e),
    }
}

const USER_COLUMNS: &str =
    "id, username, email, hashed_password, is_active, created_at, last_updated";

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE username = ? LIMIT 1",
            USER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn username_taken(
        &self,
        username: &str,
        exclude_id: Option<u64>,
    ) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM users WHERE username = ? AND id != ?",
        )
        .bind(username)
        .bind(exclude_id.unwrap_or(0))
        .fetch_one(&self.pool)
        .await
        .map_err(query_error)?;

        let count: i64 = row.try_get("count").map_err(|e| db_error("count", e))?;
        Ok(count > 0)
    }

    async fn email_taken(
        &self,
        email: &str,
        exclude_id: Option<u64>,
    ) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users WHERE email = ? AND id != ?")
            .bind(email)
            .bind(exclude_id.unwrap_or(0))
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        let count: i64 = row.try_get("count").map_err(|e| db_error("count", e))?;
        Ok(count > 0)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, hashed_password, is_active)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(user.is_active)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        let id = result.last_insert_id();
        self.find_by_id(id).await?.ok_or(DomainError::Internal {
            message: "user vanished immediately after insert".to_string(),
        })
    }

    async fn update_profile(
        &self,
        id: u64,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, DomainError> {
        // COALESCE keeps the stored value for fields not being updated.
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = COALESCE(?, username),
                email = COALESCE(?, email)
            WHERE id = ?
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            // MySQL reports zero affected rows for no-op updates too, so
            // distinguish "missing" from "unchanged" with a lookup.
            return self.find_by_id(id).await;
        }

        self.find_by_id(id).await
    }

    async fn update_password(&self, id: u64, hashed_password: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET hashed_password = ? WHERE id = ?")
            .bind(hashed_password)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn deactivate(&self, id: u64) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET is_active = FALSE WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }
}
