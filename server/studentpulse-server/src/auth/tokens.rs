//! JWT issuance and verification
//!
//! Tokens are HS256-signed and carry the user id and username; handlers
//! use [`TokenService::verify`] to authenticate bearer tokens.

use anyhow::{Context, Result};
use database_layer::UserSummary;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenClaims {
    /// Subject (user id)
    pub sub: String,
    /// Username at issuance time
    pub username: String,
    /// Unique token id
    pub jti: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

/// Signs and verifies access tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl_seconds: i64,
}

impl TokenService {
    pub fn new(secret: &str, issuer: String, ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            ttl_seconds,
        }
    }

    /// Issue an access token for the given user
    pub fn issue(&self, user: &UserSummary) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = TokenClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
            iss: self.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("failed to sign access token")
    }

    /// Verify a token's signature, expiry and issuer
    pub fn verify(&self, token: &str) -> Result<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .context("token verification failed")?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}
