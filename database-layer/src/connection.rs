// Database connection management
use crate::error::{DatabaseError, DatabaseResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{info, warn};

/// Database connection pool wrapper
///
/// The pool is the only shared resource in the system; handlers borrow it per
/// request and release the connection when the query completes.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Create a new database pool from a connection string
    pub async fn connect(connection_string: &str, max_connections: u32) -> DatabaseResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect(connection_string)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        info!("Database connection pool created successfully");

        Ok(Self { pool })
    }

    /// Create a pool without establishing a connection up front
    ///
    /// Connections are opened on first use. Useful for tests that exercise
    /// routes which never reach the database.
    pub fn connect_lazy(connection_string: &str) -> DatabaseResult<Self> {
        let pool = PgPoolOptions::new()
            .connect_lazy(connection_string)
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Get the underlying PgPool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending schema migrations
    pub async fn run_migrations(&self) -> DatabaseResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        info!("Database migrations applied");

        Ok(())
    }

    /// Check if the pool is healthy
    pub async fn is_healthy(&self) -> bool {
        match sqlx::query("SELECT 1").fetch_one(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                false
            }
        }
    }

    /// Close the pool
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}
