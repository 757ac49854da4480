use sqlx::PgPool;

use crate::error::DatabaseResult;
use crate::models::{UserRecord, UserSummary};

/// Repository for the `users` table backing token issuance
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up a user with their stored password hash
    pub async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a new user with an already-hashed password
    pub async fn create(&self, username: &str, password_hash: &str) -> DatabaseResult<UserSummary> {
        let user = sqlx::query_as::<_, UserSummary>(
            "INSERT INTO users (username, password) VALUES ($1, $2) RETURNING id, username",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
