//! Middleware for request processing

use axum::{
    extract::Request,
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tower_http::cors::{Any, CorsLayer};

/// Create the CORS layer applied to every route
///
/// The dashboard frontend is served from a different origin in
/// development, so the API answers cross-origin requests.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Request timing middleware for performance monitoring
pub async fn request_timing_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        path = %path,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "request completed"
    );

    if duration > Duration::from_secs(1) {
        tracing::warn!(
            path = %path,
            duration_ms = duration.as_millis(),
            "Slow request detected"
        );
    }

    response
}
