use std::time::Duration;

use sqlx::PgPool;

use crate::config::auth::AuthConfig;
use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::email::EmailConfig;
use crate::config::jwt::JwtConfig;
use crate::utils::otp::OtpStore;
use crate::utils::revocation::RevocationLedger;

/// Shared application state: configuration plus the injected trust-core
/// collaborators. The OTP store and revocation ledger live here rather
/// than in process-wide statics, so everything the session verifier and
/// token issuer touch is passed in explicitly.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub email_config: EmailConfig,
    pub auth_config: AuthConfig,
    pub cors_config: CorsConfig,
    pub otp_store: OtpStore,
    pub revocations: RevocationLedger,
}

pub async fn init_app_state() -> AppState {
    let db = init_db_pool().await;
    let auth_config = AuthConfig::from_env();
    let otp_store = OtpStore::new(Duration::from_secs(auth_config.otp_ttl_secs));
    let revocations = RevocationLedger::new(db.clone());

    AppState {
        db,
        jwt_config: JwtConfig::from_env(),
        email_config: EmailConfig::from_env(),
        auth_config,
        cors_config: CorsConfig::from_env(),
        otp_store,
        revocations,
    }
}
