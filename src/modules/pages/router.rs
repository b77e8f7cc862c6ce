use axum::{Router, middleware, routing::get};

use crate::middleware::admin::require_admin;
use crate::modules::pages::controller::{
    admin_dashboard, banned, home, moderation, profile, profile_preview, show_user,
};
use crate::state::AppState;

pub fn init_pages_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/banned", get(banned))
        .route("/profile", get(profile))
        .route("/profile/preview", get(profile_preview))
        .route("/users/{username_or_uid}", get(show_user))
        .route("/moderation", get(moderation))
        .nest("/admin", init_admin_router(state))
}

fn init_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(admin_dashboard))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
