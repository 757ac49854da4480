pub mod paths;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{auth, health, students},
    openapi,
    server::StudentPulseServer,
};

/// Create health check routes
pub fn health_routes() -> Router<StudentPulseServer> {
    Router::new()
        .route(paths::health::HEALTH, get(health::health_check))
        .route(paths::health::VERSION, get(health::version_info))
}

/// Create authentication routes
pub fn auth_routes() -> Router<StudentPulseServer> {
    Router::new()
        .route(paths::auth::LOGIN, post(auth::login))
        .route(paths::auth::REGISTER, post(auth::register))
        .route(paths::auth::ME, get(auth::introspect))
}

/// Create student data and aggregate routes
pub fn student_routes() -> Router<StudentPulseServer> {
    Router::new()
        .route(paths::students::ROOT, get(students::list_students))
        .route(paths::students::LEVELS, get(students::level_distribution))
        .route(paths::students::CATEGORIES, get(students::category_breakdown))
        .route(paths::students::WARD_AVERAGE, get(students::ward_average))
        .route(
            paths::students::WARD_ATTENDANCE,
            get(students::ward_attendance),
        )
        .route(
            paths::students::SUBJECT_TOTALS,
            get(students::subject_totals),
        )
        .route(
            paths::students::CLASS_ATTENDANCE,
            get(students::class_attendance),
        )
}

/// Create API routes nested under the `/api` prefix
pub fn api_routes() -> Router<StudentPulseServer> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/students", student_routes())
}

/// Create all application routes
pub fn create_routes() -> Router<StudentPulseServer> {
    Router::new()
        // Health check routes (no authentication required)
        .merge(health_routes())
        // API documentation routes
        .merge(openapi::create_docs_routes())
        // Data and auth routes
        .nest(paths::API, api_routes())
}
