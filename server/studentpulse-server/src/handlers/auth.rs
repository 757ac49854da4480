use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use database_layer::UserSummary;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::TokenClaims;
use crate::error::ApiError;
use crate::server::StudentPulseServer;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_length, validate_required};

/// Login request payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account username
    #[schema(example = "admin")]
    pub username: String,
    /// Account password
    pub password: String,
}

impl RequestValidation for LoginRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.username, "Username is required");
        validate_required!(self.password, "Password is required");
        Ok(())
    }
}

/// Registration request payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Desired username
    #[schema(example = "admin")]
    pub username: String,
    /// Desired password
    pub password: String,
}

impl RequestValidation for RegisterRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.username, "Username is required");
        validate_length!(
            self.username,
            1,
            200,
            "Username must be at most 200 characters"
        );
        validate_length!(
            self.password,
            8,
            128,
            "Password must be between 8 and 128 characters"
        );
        Ok(())
    }
}

/// Successful login response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed access token
    pub token: String,
    /// Authenticated user
    pub user: UserSummary,
}

/// Successful registration response
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// Status message
    #[schema(example = "User registered")]
    pub message: String,
    /// Created user
    pub user: UserSummary,
}

/// Token introspection response
#[derive(Debug, Serialize, ToSchema)]
pub struct IntrospectResponse {
    /// Claims carried by the presented token
    pub user: TokenClaims,
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ApiError::internal(format!("password hashing failed: {err}")))
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
        .is_ok()
}

/// Login handler
///
/// An unknown username and a wrong password produce the same error
/// message so the endpoint does not leak which accounts exist.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing credentials", body = crate::error::ErrorBody),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorBody)
    )
)]
pub async fn login(
    State(server): State<StudentPulseServer>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.validate()?;

    let user = server
        .users
        .find_by_username(&payload.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(&payload.password, &user.password) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let summary = UserSummary {
        id: user.id,
        username: user.username,
    };
    let token = server
        .tokens
        .issue(&summary)
        .map_err(|err| ApiError::internal(err.to_string()))?;

    tracing::info!(username = %summary.username, "user logged in");

    Ok(Json(LoginResponse {
        token,
        user: summary,
    }))
}

/// Registration handler
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 400, description = "Invalid payload or duplicate username", body = crate::error::ErrorBody)
    )
)]
pub async fn register(
    State(server): State<StudentPulseServer>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    payload.validate()?;

    if server
        .users
        .find_by_username(&payload.username)
        .await?
        .is_some()
    {
        return Err(ApiError::validation("Username is already taken"));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = server.users.create(&payload.username, &password_hash).await?;

    tracing::info!(username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered".to_string(),
            user,
        }),
    ))
}

/// Token introspection handler
///
/// Returns the claims of the bearer token presented in the
/// Authorization header.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Token is valid", body = IntrospectResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody)
    )
)]
pub async fn introspect(
    State(server): State<StudentPulseServer>,
    headers: HeaderMap,
) -> Result<Json<IntrospectResponse>, ApiError> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::unauthorized("Missing token"))?;

    let claims = server
        .tokens
        .verify(token)
        .map_err(|_| ApiError::unauthorized("Invalid token"))?;

    Ok(Json(IntrospectResponse { user: claims }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn test_login_request_requires_fields() {
        let req = LoginRequest {
            username: String::new(),
            password: "secret".to_string(),
        };
        assert!(req.validate().is_err());

        let req = LoginRequest {
            username: "admin".to_string(),
            password: "  ".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_password_length() {
        let req = RegisterRequest {
            username: "admin".to_string(),
            password: "short".to_string(),
        };
        assert!(req.validate().is_err());

        let req = RegisterRequest {
            username: "admin".to_string(),
            password: "long enough password".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
