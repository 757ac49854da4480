//! Row types returned by the repositories
//!
//! Text columns on `student_performance` are nullable in the seeded schema,
//! so the record fields are optional across the board. Aggregate counts come
//! back as `int8` (the queries cast where the column type is narrower).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One row of the `student_performance` wide table
///
/// The `class` column is aliased to `student_class` on read; the API never
/// exposes the reserved identifier.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentRecord {
    pub id: i32,
    pub student_name: Option<String>,
    pub gender: Option<String>,
    pub ward: Option<String>,
    pub school_name: Option<String>,
    pub medium: Option<String>,
    pub student_class: Option<String>,
    pub reading_level: Option<String>,
    pub writing_level: Option<String>,
    pub numeracy_level: Option<String>,
    pub attendance: Option<String>,
}

/// Per-level slice of the level-distribution aggregate
///
/// `percentage` is null when the denominator population is empty.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct LevelSlice {
    pub level: String,
    pub total_students: i64,
    pub percentage: Option<f64>,
}

/// Per-category slice of the category breakdown
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CategorySlice {
    pub category: String,
    pub total_students: i64,
    pub percentage: Option<f64>,
}

/// Mean numeric level per ward for one subject
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct WardAverage {
    pub ward: Option<String>,
    pub total_students: i64,
    pub avg_level: f64,
}

/// One row of the precomputed `ward_attendance` summary table
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct WardAttendance {
    pub ward: String,
    pub total_students: i64,
    pub present: i64,
    pub absent: i64,
    pub long_absent: i64,
}

/// Attendance indicator sums grouped by class
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ClassAttendance {
    pub class: String,
    pub total_students: i64,
    pub present: i64,
    pub absent: i64,
    pub long_absent: i64,
}

/// Count of Present students with a recorded level, per subject
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct SubjectTotals {
    pub reading: i64,
    pub writing: i64,
    pub numeracy: i64,
}

/// Full user row including the password hash; never serialized
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    pub password: String,
}

/// User identity as exposed by the API
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
}
