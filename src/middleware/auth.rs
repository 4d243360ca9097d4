use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::auth::model::Claims;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{TokenType, verify_token};

/// The single gate every protected operation passes through.
///
/// Validation order, first failure short-circuits:
///
/// 1. bearer header present and well-formed
/// 2. signature + structural decode
/// 3. expiry
/// 4. token type against what the endpoint expects
/// 5. revocation ledger lookup
///
/// Nothing is admitted on partial validation; the default is reject.
pub async fn authenticate(
    parts: &mut Parts,
    state: &AppState,
    expected_type: Option<TokenType>,
) -> Result<Claims, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format".to_string()))?;

    let claims = verify_token(token, &state.jwt_config)?;

    if let Some(expected) = expected_type {
        if claims.token_type != expected.as_str() {
            return Err(AppError::unauthorized(format!(
                "Only {} tokens are accepted here",
                expected.as_str()
            )));
        }
    }

    if state.revocations.is_revoked(&claims.jti).await? {
        return Err(AppError::unauthorized("Token has been revoked".to_string()));
    }

    Ok(claims)
}

/// Extractor for endpoints protected by an access token. Exposes the
/// resolved claims to the handler for authorization decisions.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The subject identity (normalized email).
    pub fn email(&self) -> &str {
        &self.0.sub
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = authenticate(parts, state, Some(TokenType::Access)).await?;
        Ok(AuthUser(claims))
    }
}

/// Extractor for the refresh endpoint: only refresh tokens are admitted,
/// so a stolen access token cannot mint new credentials.
#[derive(Debug, Clone)]
pub struct RefreshUser(pub Claims);

impl FromRequestParts<AppState> for RefreshUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = authenticate(parts, state, Some(TokenType::Refresh)).await?;
        Ok(RefreshUser(claims))
    }
}

/// Extractor for logout: accepts either token type so clients can revoke
/// whichever credential they still hold.
#[derive(Debug, Clone)]
pub struct AnyTokenUser(pub Claims);

impl FromRequestParts<AppState> for AnyTokenUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = authenticate(parts, state, None).await?;
        Ok(AnyTokenUser(claims))
    }
}
