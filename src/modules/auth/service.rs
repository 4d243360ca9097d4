use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{error, instrument};
use uuid::Uuid;

use crate::config::auth::AuthConfig;
use crate::config::email::EmailConfig;
use crate::config::jwt::JwtConfig;
use crate::modules::users::model::User;
use crate::utils::email::EmailService;
use crate::utils::errors::AppError;
use crate::utils::jwt::{create_access_token, create_refresh_token};
use crate::utils::otp::OtpStore;
use crate::utils::password::{dummy_verify, hash_password, verify_password};
use crate::utils::revocation::RevocationLedger;

use super::model::{
    Claims, LoginRequest, LoginResponse, MessageResponse, RefreshResponse, RegisterRequest,
    TokenPair, VerifyOtpRequest,
};

#[derive(sqlx::FromRow)]
struct UserCredentials {
    first_name: String,
    email: String,
    password: String,
    deactivated: bool,
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(dto))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        let email = dto.email.to_lowercase();

        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!(
                "User with email '{}' already exists. Please login",
                email
            )));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (first_name, last_name, description, email, password)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, first_name, last_name, description, email, created_at",
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.description)
        .bind(&email)
        .bind(&hashed_password)
        .fetch_one(db)
        .await?;

        Ok(user)
    }

    /// Verify credentials and, on success, stage an OTP challenge and
    /// dispatch the code by email. The response never carries the code,
    /// and delivery runs detached so a slow mail relay cannot stall the
    /// login round-trip.
    #[instrument(skip(otp_store, email_config, dto))]
    pub async fn login_user(
        db: &PgPool,
        otp_store: &OtpStore,
        email_config: &EmailConfig,
        dto: LoginRequest,
    ) -> Result<MessageResponse, AppError> {
        let email = dto.email.to_lowercase();
        let user = Self::verify_credentials(db, &email, &dto.password).await?;

        let code = otp_store.issue(&email);

        let email_service = EmailService::new(email_config.clone());
        let recipient = user.email.clone();
        let first_name = user.first_name.clone();
        tokio::spawn(async move {
            if let Err(err) = email_service
                .send_otp_email(&recipient, &first_name, &code)
                .await
            {
                error!(error = %err.error, "Failed to deliver OTP email");
            }
        });

        Ok(MessageResponse {
            message: "A one-time passcode has been sent to your email".to_string(),
        })
    }

    /// Consume the pending OTP challenge and mint the token pair. Every
    /// failure mode (no challenge, expired, wrong code) collapses into a
    /// single uniform rejection.
    #[instrument(skip(otp_store, jwt_config, auth_config, dto))]
    pub async fn verify_otp(
        db: &PgPool,
        otp_store: &OtpStore,
        jwt_config: &JwtConfig,
        auth_config: &AuthConfig,
        dto: VerifyOtpRequest,
    ) -> Result<LoginResponse, AppError> {
        let email = dto.email.to_lowercase();

        if !otp_store.verify(&email, &dto.code) {
            return Err(AppError::unauthorized("Invalid OTP".to_string()));
        }

        let user: Option<UserCredentials> = sqlx::query_as(
            "SELECT first_name, email, password, deactivated FROM users WHERE email = $1",
        )
        .bind(&email)
        .fetch_optional(db)
        .await?;

        let user = user.ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;
        if user.deactivated {
            return Err(AppError::unauthorized("Invalid OTP".to_string()));
        }

        let is_admin = auth_config.is_admin(&user.email);
        let access = create_access_token(&user.email, is_admin, jwt_config)?;
        let refresh = create_refresh_token(&user.email, is_admin, jwt_config)?;

        Ok(LoginResponse {
            message: "Logged In".to_string(),
            tokens: TokenPair { access, refresh },
        })
    }

    /// Mint a fresh access token for the subject of a verified refresh
    /// token. The previous access token, if any, is untouched: it stays
    /// valid until its own expiry or explicit revocation.
    pub fn refresh_access_token(
        claims: &Claims,
        jwt_config: &JwtConfig,
    ) -> Result<RefreshResponse, AppError> {
        let access_token = create_access_token(&claims.sub, claims.is_admin, jwt_config)?;

        Ok(RefreshResponse { access_token })
    }

    /// Write the token's id into the revocation ledger. The write is
    /// awaited: if it fails, the logout fails.
    #[instrument(skip(revocations))]
    pub async fn logout(
        revocations: &RevocationLedger,
        claims: &Claims,
    ) -> Result<MessageResponse, AppError> {
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp as i64, 0)
            .ok_or_else(|| AppError::internal_error("Invalid token expiry".to_string()))?;

        revocations
            .revoke(&claims.jti, &claims.token_type, expires_at)
            .await?;

        Ok(MessageResponse {
            message: format!("{} token revoked successfully", claims.token_type),
        })
    }

    /// Look up the identity and compare the password. Both "no such
    /// email" and "wrong password" surface as the same rejection, and a
    /// lookup miss still burns a hash comparison so the two paths take
    /// comparable time.
    async fn verify_credentials(
        db: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<UserCredentials, AppError> {
        let user: Option<UserCredentials> = sqlx::query_as(
            "SELECT first_name, email, password, deactivated FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await?;

        let Some(user) = user else {
            dummy_verify(password);
            return Err(AppError::unauthorized(
                "Invalid email or password".to_string(),
            ));
        };

        let is_valid = verify_password(password, &user.password)?;
        if !is_valid || user.deactivated {
            return Err(AppError::unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        Ok(user)
    }
}
