use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
