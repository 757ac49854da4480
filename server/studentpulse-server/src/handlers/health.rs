use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::server::StudentPulseServer;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall system health status
    #[schema(example = "healthy")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2026-01-15T10:30:00Z")]
    pub timestamp: String,
    /// API version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Individual service health checks
    pub checks: HashMap<String, String>,
}

/// Version information response
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionResponse {
    /// Application name
    #[schema(example = "StudentPulse")]
    pub name: String,
    /// Application version
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// Health check handler
///
/// Reports "degraded" rather than failing the request when the
/// database is unreachable, so load balancers still get a body.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "System health report", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(server): State<StudentPulseServer>,
) -> Result<Json<HealthResponse>, ApiError> {
    let database_healthy = server.db_pool.is_healthy().await;

    let mut checks = HashMap::new();
    checks.insert(
        "database".to_string(),
        if database_healthy {
            "healthy".to_string()
        } else {
            "unreachable".to_string()
        },
    );

    let response = HealthResponse {
        status: if database_healthy {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    Ok(Json(response))
}

/// Version information handler
#[utoipa::path(
    get,
    path = "/version",
    tag = "health",
    responses(
        (status = 200, description = "Version information", body = VersionResponse)
    )
)]
pub async fn version_info(
    State(server): State<StudentPulseServer>,
) -> Result<Json<VersionResponse>, ApiError> {
    Ok(Json(VersionResponse {
        name: server.config.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
