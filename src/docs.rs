use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, MessageResponse, RefreshResponse, RegisterRequest, TokenPair,
    VerifyOtpRequest,
};
use crate::modules::users::model::{
    PaginatedUsersResponse, ProfileResponse, UpdateDescriptionDto, User, UserSummary,
};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::verify_otp,
        crate::modules::auth::controller::refresh_access,
        crate::modules::auth::controller::logout_user,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::deactivate_user,
        crate::modules::users::controller::list_users,
    ),
    components(
        schemas(
            User,
            UserSummary,
            RegisterRequest,
            LoginRequest,
            VerifyOtpRequest,
            LoginResponse,
            TokenPair,
            RefreshResponse,
            MessageResponse,
            ErrorResponse,
            ProfileResponse,
            UpdateDescriptionDto,
            PaginatedUsersResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, OTP login, token refresh and logout"),
        (name = "Users", description = "Profile and user management endpoints")
    ),
    info(
        title = "Authgate API",
        version = "0.1.0",
        description = "A REST API built with Rust, Axum, and PostgreSQL featuring JWT authentication with an email OTP step-up and token revocation.",
        contact(
            name = "API Support",
            email = "support@authgate.dev"
        ),
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
