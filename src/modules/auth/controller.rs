use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::{AnyTokenUser, RefreshUser};
use crate::modules::users::model::User;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    LoginRequest, LoginResponse, MessageResponse, RefreshResponse, RegisterRequest,
    VerifyOtpRequest,
};
use super::service::AuthService;

#[derive(serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error, all violations reported", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::register_user(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Verify credentials and receive an OTP challenge by email
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "OTP challenge issued and emailed", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let response =
        AuthService::login_user(&state.db, &state.otp_store, &state.email_config, dto).await?;
    Ok(Json(response))
}

/// Verify the OTP challenge and receive the token pair
#[utoipa::path(
    post,
    path = "/api/auth/verify-otp",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "OTP verified, tokens issued", body = LoginResponse),
        (status = 401, description = "Invalid OTP", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn verify_otp(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<VerifyOtpRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::verify_otp(
        &state.db,
        &state.otp_store,
        &state.jwt_config,
        &state.auth_config,
        dto,
    )
    .await?;
    Ok(Json(response))
}

/// Mint a new access token from a refresh token
#[utoipa::path(
    get,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "New access token issued", body = RefreshResponse),
        (status = 401, description = "Missing, invalid, revoked or non-refresh token", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, refresh_user))]
pub async fn refresh_access(
    State(state): State<AppState>,
    refresh_user: RefreshUser,
) -> Result<Json<RefreshResponse>, AppError> {
    let response = AuthService::refresh_access_token(&refresh_user.0, &state.jwt_config)?;
    Ok(Json(response))
}

/// Revoke the presented token
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Token revoked", body = MessageResponse),
        (status = 401, description = "Missing, invalid or already revoked token", body = ErrorResponse),
        (status = 500, description = "Revocation write failed; the token is still live", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, token_user))]
pub async fn logout_user(
    State(state): State<AppState>,
    token_user: AnyTokenUser,
) -> Result<Json<MessageResponse>, AppError> {
    let response = AuthService::logout(&state.revocations, &token_user.0).await?;
    Ok(Json(response))
}
