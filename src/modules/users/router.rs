use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{deactivate_user, get_profile, list_users, update_profile};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/deactivate", delete(deactivate_user))
}
