use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Claims;
use crate::utils::errors::AppError;

/// The two token kinds the issuer mints. Access tokens authorize protected
/// operations; refresh tokens are accepted only by the refresh endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

fn create_token(
    email: &str,
    is_admin: bool,
    token_type: TokenType,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let expiry = match token_type {
        TokenType::Access => jwt_config.access_token_expiry,
        TokenType::Refresh => jwt_config.refresh_token_expiry,
    };

    let claims = Claims {
        sub: email.to_string(),
        jti: Uuid::new_v4().to_string(),
        token_type: token_type.as_str().to_string(),
        is_admin,
        exp: (now + expiry) as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

pub fn create_access_token(
    email: &str,
    is_admin: bool,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    create_token(email, is_admin, TokenType::Access, jwt_config)
}

pub fn create_refresh_token(
    email: &str,
    is_admin: bool,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    create_token(email, is_admin, TokenType::Refresh, jwt_config)
}

/// Decode and verify a token's signature and expiry. Type and revocation
/// checks are the session verifier's job; this only guarantees the claims
/// are authentic and not past their expiry.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized("Token has expired".to_string()),
        _ => AppError::unauthorized("Signature verification failed".to_string()),
    })
}
