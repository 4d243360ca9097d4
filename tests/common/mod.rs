use std::time::Duration;

use authgate::config::auth::AuthConfig;
use authgate::config::cors::CorsConfig;
use authgate::config::email::EmailConfig;
use authgate::config::jwt::JwtConfig;
use authgate::state::AppState;
use authgate::utils::otp::OtpStore;
use authgate::utils::password::hash_password;
use authgate::utils::revocation::RevocationLedger;
use sqlx::PgPool;
use uuid::Uuid;

#[allow(dead_code)]
pub const TEST_ADMIN_EMAIL: &str = "admin@test.com";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604800,
    }
}

/// Build an AppState around the given pool with deterministic test
/// configuration: SMTP disabled, a fixed admin identity and a 5 minute
/// OTP TTL.
pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        db: pool.clone(),
        jwt_config: test_jwt_config(),
        email_config: EmailConfig {
            enabled: false,
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: "noreply@test.com".to_string(),
            from_name: "Authgate".to_string(),
        },
        auth_config: AuthConfig {
            admin_email: TEST_ADMIN_EMAIL.to_string(),
            otp_ttl_secs: 300,
        },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        otp_store: OtpStore::new(Duration::from_secs(300)),
        revocations: RevocationLedger::new(pool),
    }
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

/// Insert a user directly, bypassing the registration endpoint.
pub async fn create_test_user(pool: &PgPool, email: &str, password: &str) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let row: (Uuid,) = sqlx::query_as(
        "INSERT INTO users (first_name, last_name, email, password)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind("Test")
    .bind("User")
    .bind(email)
    .bind(hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id: row.0,
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}
