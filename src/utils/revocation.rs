use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::utils::errors::AppError;

/// Durable set of revoked token ids, backed by the token_blocklist table.
///
/// `is_revoked` is consulted on every authenticated request; the token
/// signature alone cannot express logout. Writes are awaited before the
/// logout response is returned, so a revocation is visible to every
/// subsequent read through the shared pool.
#[derive(Clone, Debug)]
pub struct RevocationLedger {
    db: PgPool,
}

impl RevocationLedger {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a token id as revoked. A failure here must surface as a
    /// failed logout, never as a silent success.
    #[instrument(skip(self))]
    pub async fn revoke(
        &self,
        jti: &str,
        token_type: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        // An expired token can never pass validation, so records past the
        // token's natural expiry carry no information. Pruning them here
        // keeps the ledger bounded by the refresh-token lifetime.
        sqlx::query("DELETE FROM token_blocklist WHERE expires_at < NOW()")
            .execute(&self.db)
            .await?;

        sqlx::query(
            "INSERT INTO token_blocklist (jti, token_type, expires_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (jti) DO NOTHING",
        )
        .bind(jti)
        .bind(token_type)
        .bind(expires_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn is_revoked(&self, jti: &str) -> Result<bool, AppError> {
        let found: Option<(String,)> =
            sqlx::query_as("SELECT jti FROM token_blocklist WHERE jti = $1")
                .bind(jti)
                .fetch_optional(&self.db)
                .await?;

        Ok(found.is_some())
    }
}
