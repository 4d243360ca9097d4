use axum::Json;
use axum::extract::{Query, State};
use tracing::instrument;

use crate::middleware::admin::RequireAdmin;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    PaginatedUsersResponse, ProfileResponse, UpdateDescriptionDto, UserFilterParams,
};
use super::service::UserService;

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "User profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = UserService::get_profile(&state.db, auth_user.email()).await?;
    Ok(Json(profile))
}

/// Update the current user's description
#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateDescriptionDto,
    responses(
        (status = 200, description = "Description updated", body = MessageResponse),
        (status = 400, description = "description key is missing", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateDescriptionDto>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::update_description(&state.db, auth_user.email(), &dto.description).await?;
    Ok(Json(MessageResponse {
        message: "Description updated".to_string(),
    }))
}

/// Deactivate the current user
#[utoipa::path(
    delete,
    path = "/api/users/deactivate",
    responses(
        (status = 200, description = "User deactivated", body = MessageResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, auth_user))]
pub async fn deactivate_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::deactivate(&state.db, auth_user.email()).await?;
    Ok(Json(MessageResponse {
        message: "User deactivated".to_string(),
    }))
}

/// List users (admin only, paginated)
#[utoipa::path(
    get,
    path = "/api/users",
    params(
        ("limit" = Option<i64>, Query, description = "Page size, 1-100"),
        ("page" = Option<i64>, Query, description = "1-based page number"),
        ("offset" = Option<i64>, Query, description = "Row offset, overridden by page")
    ),
    responses(
        (status = 200, description = "Paginated list of users", body = PaginatedUsersResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not the administrator", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, _admin))]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(params): Query<UserFilterParams>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    let response = UserService::list_users(&state.db, &params.pagination).await?;
    Ok(Json(response))
}
