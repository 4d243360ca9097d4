use axum::{extract::FromRequestParts, http::request::Parts};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Extractor for admin-only endpoints.
///
/// Runs the full session verification via [`AuthUser`] and then requires
/// the `is_admin` claim. Handlers still get the inner claims.
///
/// ```rust,ignore
/// pub async fn list_users(
///     RequireAdmin(auth_user): RequireAdmin,
/// ) -> Result<Json<Response>, AppError> {
///     // Only the configured administrator reaches this point
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.is_admin() {
            return Err(AppError::forbidden(
                "You are not authorized to access this".to_string(),
            ));
        }

        Ok(RequireAdmin(auth_user))
    }
}
