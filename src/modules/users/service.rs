use sqlx::PgPool;
use tracing::instrument;

use crate::utils::errors::AppError;
use crate::utils::pagination::{PaginationMeta, PaginationParams};

use super::model::{PaginatedUsersResponse, ProfileResponse, User, UserSummary};

pub struct UserService;

impl UserService {
    #[instrument]
    pub async fn get_profile(db: &PgPool, email: &str) -> Result<ProfileResponse, AppError> {
        let user = Self::get_active_user(db, email).await?;

        Ok(ProfileResponse {
            full_name: format!("{} {}", user.first_name, user.last_name),
            email: user.email,
            description: user.description,
        })
    }

    #[instrument(skip(description))]
    pub async fn update_description(
        db: &PgPool,
        email: &str,
        description: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET description = $1, updated_at = NOW()
             WHERE email = $2 AND deactivated = FALSE",
        )
        .bind(description)
        .bind(email)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        Ok(())
    }

    /// Deactivation is a terminal flag, not a row deletion: the identity
    /// row stays behind so token subjects and revocation records keep
    /// referring to something.
    #[instrument]
    pub async fn deactivate(db: &PgPool, email: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET deactivated = TRUE, updated_at = NOW()
             WHERE email = $1 AND deactivated = FALSE",
        )
        .bind(email)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        Ok(())
    }

    #[instrument]
    pub async fn list_users(
        db: &PgPool,
        pagination: &PaginationParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let limit = pagination.limit();
        let offset = pagination.offset();

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE deactivated = FALSE")
            .fetch_one(db)
            .await?;

        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT id, email FROM users WHERE deactivated = FALSE
             ORDER BY created_at
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok(PaginatedUsersResponse {
            users,
            meta: PaginationMeta {
                total: total.0,
                limit,
                offset: Some(offset),
                page: pagination.page(),
                has_more: offset + limit < total.0,
            },
        })
    }

    async fn get_active_user(db: &PgPool, email: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, description, email, created_at
             FROM users WHERE email = $1 AND deactivated = FALSE",
        )
        .bind(email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}
