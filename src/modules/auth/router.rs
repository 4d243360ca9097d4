use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{login_user, logout_user, refresh_access, register_user, verify_otp};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/verify-otp", post(verify_otp))
        .route("/refresh", get(refresh_access))
        .route("/logout", get(logout_user))
}
