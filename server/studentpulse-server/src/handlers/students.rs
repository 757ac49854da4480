use axum::{
    extract::{Path, Query, State},
    Json,
};
use database_layer::{
    AggregateScope, CategorySlice, ClassAttendance, LevelSlice, StudentFilter, StudentRecord,
    Subject, SubjectTotals, WardAttendance, WardAverage,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::server::StudentPulseServer;
use crate::types::pagination::{total_pages, PaginationParams};

/// Substring filters accepted by the student listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentFilterQuery {
    /// Match against the student's name
    pub student_name: Option<String>,
    /// Match against the ward name
    pub ward: Option<String>,
    /// Match against the school name
    pub school_name: Option<String>,
    /// Match against the teaching medium
    pub medium: Option<String>,
    /// Match against the class label
    pub class: Option<String>,
}

impl From<StudentFilterQuery> for StudentFilter {
    fn from(query: StudentFilterQuery) -> Self {
        StudentFilter {
            student_name: query.student_name,
            ward: query.ward,
            school_name: query.school_name,
            medium: query.medium,
            class: query.class,
        }
    }
}

/// Exact-match scope accepted by the level-distribution aggregate
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScopeQuery {
    /// Restrict to one class
    pub class: Option<String>,
    /// Restrict to one ward
    pub ward: Option<String>,
}

impl From<ScopeQuery> for AggregateScope {
    fn from(query: ScopeQuery) -> Self {
        AggregateScope {
            class: query.class,
            ward: query.ward,
        }
    }
}

/// One page of the student listing
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentListResponse {
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Total matching rows across all pages
    pub total: i64,
    /// Total pages at this page size
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    /// Rows of the current page
    pub data: Vec<StudentRecord>,
}

fn parse_subject(raw: &str) -> Result<Subject, ApiError> {
    Subject::from_str(raw).map_err(|_| ApiError::validation("Invalid subject"))
}

/// Paginated, filtered student listing
#[utoipa::path(
    get,
    path = "/api/students",
    tag = "students",
    params(StudentFilterQuery, PaginationParams),
    responses(
        (status = 200, description = "One page of students", body = StudentListResponse)
    )
)]
pub async fn list_students(
    State(server): State<StudentPulseServer>,
    Query(filter): Query<StudentFilterQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<StudentListResponse>, ApiError> {
    let default_limit = server.config.default_page_size;
    let page = pagination.page();
    let limit = pagination.limit(default_limit);
    let offset = i64::try_from(pagination.offset(default_limit)).unwrap_or(i64::MAX);

    let filter: StudentFilter = filter.into();
    let data = server
        .students
        .list(&filter, i64::from(limit), offset)
        .await?;
    let total = server.students.count(&filter).await?;

    Ok(Json(StudentListResponse {
        page,
        limit,
        total,
        total_pages: total_pages(total, limit),
        data,
    }))
}

/// Per-level distribution for one subject
///
/// Percentages are computed against all students in the same scope, so
/// a class/ward restriction narrows the denominator too.
#[utoipa::path(
    get,
    path = "/api/students/levels/{subject}",
    tag = "students",
    params(
        ("subject" = String, Path, description = "reading, writing or numeracy"),
        ScopeQuery
    ),
    responses(
        (status = 200, description = "Level distribution", body = [LevelSlice]),
        (status = 400, description = "Unknown subject", body = crate::error::ErrorBody)
    )
)]
pub async fn level_distribution(
    State(server): State<StudentPulseServer>,
    Path(subject): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Vec<LevelSlice>>, ApiError> {
    let subject = parse_subject(&subject)?;
    let scope: AggregateScope = scope.into();

    let slices = server.students.level_distribution(subject, &scope).await?;
    Ok(Json(slices))
}

/// Per-category breakdown for one subject
#[utoipa::path(
    get,
    path = "/api/students/categories/{subject}",
    tag = "students",
    params(("subject" = String, Path, description = "reading, writing or numeracy")),
    responses(
        (status = 200, description = "Category breakdown", body = [CategorySlice]),
        (status = 400, description = "Unknown subject", body = crate::error::ErrorBody)
    )
)]
pub async fn category_breakdown(
    State(server): State<StudentPulseServer>,
    Path(subject): Path<String>,
) -> Result<Json<Vec<CategorySlice>>, ApiError> {
    let subject = parse_subject(&subject)?;

    let slices = server.students.category_breakdown(subject).await?;
    Ok(Json(slices))
}

/// Average level per ward for one subject
#[utoipa::path(
    get,
    path = "/api/students/ward-average/{subject}",
    tag = "students",
    params(("subject" = String, Path, description = "reading, writing or numeracy")),
    responses(
        (status = 200, description = "Ward averages", body = [WardAverage]),
        (status = 400, description = "Unknown subject", body = crate::error::ErrorBody)
    )
)]
pub async fn ward_average(
    State(server): State<StudentPulseServer>,
    Path(subject): Path<String>,
) -> Result<Json<Vec<WardAverage>>, ApiError> {
    let subject = parse_subject(&subject)?;

    let averages = server.students.ward_average(subject).await?;
    Ok(Json(averages))
}

/// Attendance counts per ward
#[utoipa::path(
    get,
    path = "/api/students/ward-attendance",
    tag = "students",
    responses(
        (status = 200, description = "Ward attendance counts", body = [WardAttendance])
    )
)]
pub async fn ward_attendance(
    State(server): State<StudentPulseServer>,
) -> Result<Json<Vec<WardAttendance>>, ApiError> {
    let rows = server.students.ward_attendance().await?;
    Ok(Json(rows))
}

/// Assessed-student totals per subject
#[utoipa::path(
    get,
    path = "/api/students/subject-totals",
    tag = "students",
    responses(
        (status = 200, description = "Per-subject totals", body = SubjectTotals)
    )
)]
pub async fn subject_totals(
    State(server): State<StudentPulseServer>,
) -> Result<Json<SubjectTotals>, ApiError> {
    let totals = server.students.subject_totals().await?;
    Ok(Json(totals))
}

/// Attendance counts per class
#[utoipa::path(
    get,
    path = "/api/students/class-attendance",
    tag = "students",
    responses(
        (status = 200, description = "Class attendance counts", body = [ClassAttendance])
    )
)]
pub async fn class_attendance(
    State(server): State<StudentPulseServer>,
) -> Result<Json<Vec<ClassAttendance>>, ApiError> {
    let rows = server.students.class_attendance().await?;
    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subject_accepts_known_subjects() {
        assert_eq!(parse_subject("reading").unwrap(), Subject::Reading);
        assert_eq!(parse_subject("Writing").unwrap(), Subject::Writing);
        assert_eq!(parse_subject("NUMERACY").unwrap(), Subject::Numeracy);
    }

    #[test]
    fn test_parse_subject_rejects_unknown() {
        let err = parse_subject("science").unwrap_err();
        assert!(matches!(err, ApiError::Validation(m) if m == "Invalid subject"));
    }

    #[test]
    fn test_filter_query_converts_fieldwise() {
        let query = StudentFilterQuery {
            ward: Some("North".to_string()),
            class: Some("5".to_string()),
            ..Default::default()
        };
        let filter: StudentFilter = query.into();
        assert_eq!(filter.ward.as_deref(), Some("North"));
        assert_eq!(filter.class.as_deref(), Some("5"));
        assert!(filter.student_name.is_none());
    }
}
