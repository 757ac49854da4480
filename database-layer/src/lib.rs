//! Database access layer for the StudentPulse analytics API
//!
//! Wraps a pooled PostgreSQL connection and exposes typed repositories over
//! the `student_performance` wide table, the precomputed `ward_attendance`
//! aggregate and the `users` table.
//!
//! Every dynamic predicate is assembled through [`sqlx::QueryBuilder`] with
//! bound parameters; user input is never interpolated into SQL text. The
//! aggregate queries share one predicate builder between numerator and
//! denominator so that percentages within a filtered view sum to 100.

pub mod connection;
pub mod error;
pub mod filter;
pub mod models;
pub mod student_repository;
pub mod subject;
pub mod user_repository;

pub use connection::DatabasePool;
pub use error::{DatabaseError, DatabaseResult};
pub use filter::{AggregateScope, StudentFilter};
pub use models::*;
pub use student_repository::StudentRepository;
pub use subject::{Category, InvalidSubject, Level, Subject};
pub use user_repository::UserRepository;
