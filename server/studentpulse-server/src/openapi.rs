use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::server::StudentPulseServer;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::handlers::health::health_check,
        crate::handlers::health::version_info,

        // Authentication endpoints
        crate::handlers::auth::login,
        crate::handlers::auth::register,
        crate::handlers::auth::introspect,

        // Student endpoints
        crate::handlers::students::list_students,
        crate::handlers::students::level_distribution,
        crate::handlers::students::category_breakdown,
        crate::handlers::students::ward_average,
        crate::handlers::students::ward_attendance,
        crate::handlers::students::subject_totals,
        crate::handlers::students::class_attendance,
    ),
    components(
        schemas(
            // Health schemas
            crate::handlers::health::HealthResponse,
            crate::handlers::health::VersionResponse,

            // Authentication schemas
            crate::handlers::auth::LoginRequest,
            crate::handlers::auth::LoginResponse,
            crate::handlers::auth::RegisterRequest,
            crate::handlers::auth::RegisterResponse,
            crate::handlers::auth::IntrospectResponse,
            crate::auth::tokens::TokenClaims,

            // Student schemas
            crate::handlers::students::StudentListResponse,
            crate::error::ErrorBody,
            database_layer::StudentRecord,
            database_layer::LevelSlice,
            database_layer::CategorySlice,
            database_layer::WardAverage,
            database_layer::WardAttendance,
            database_layer::ClassAttendance,
            database_layer::SubjectTotals,
            database_layer::UserSummary,
        )
    ),
    tags(
        (name = "health", description = "System health and status endpoints"),
        (name = "auth", description = "User authentication"),
        (name = "students", description = "Student performance data and aggregates"),
    ),
    info(
        title = "StudentPulse API",
        version = "0.1.0",
        description = "Student performance analytics API serving the dashboard's listing, aggregate and authentication endpoints.",
        contact(
            name = "StudentPulse Team",
            email = "team@studentpulse.dev",
        ),
        license(
            name = "MIT",
        ),
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server"),
    ),
)]
pub struct ApiDoc;

/// Create OpenAPI documentation routes
///
/// The JSON document is served directly; any Swagger UI can be pointed
/// at it.
pub fn create_docs_routes() -> Router<StudentPulseServer> {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_all_operations() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/health"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/auth/login"));
        // The listing is advertised without a trailing slash
        assert!(paths.iter().any(|p| p.as_str() == "/api/students"));
        assert!(!paths.iter().any(|p| p.as_str() == "/api/students/"));
        assert!(paths
            .iter()
            .any(|p| p.as_str() == "/api/students/levels/{subject}"));
        assert!(paths
            .iter()
            .any(|p| p.as_str() == "/api/students/class-attendance"));
    }
}
