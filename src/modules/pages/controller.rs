use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use gatehouse_core::AppError;
use gatehouse_models::UserSummary;
use serde_json::json;

use crate::middleware::admin::RequireAdmin;
use crate::middleware::context::{Ctx, CurrentUser, MaybeUser, Permitted};
use crate::middleware::flash::{FlashNotice, take_flash};
use crate::middleware::scope::{current_locale_or, current_time_zone_or};
use crate::state::AppState;

/// Home page. Public; shows and consumes any pending notice.
pub async fn home(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
) -> impl IntoResponse {
    let (jar, notice) = take_flash(jar);

    let body = json!({
        "logged_in": user.is_some(),
        "user": user.as_ref().map(UserSummary::from),
        "locale": current_locale_or(state.negotiator.default_locale()),
        "time_zone": current_time_zone_or(&state.time_zone_config.default_time_zone),
        "notice": notice,
    });

    (jar, Json(body))
}

/// Status page for banned users. Exempt from the ban check.
pub async fn banned(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(json!({
        "banned": user.is_banned(),
        "user": UserSummary::from(&user),
    }))
}

/// Profile page. Shows a pending notice without consuming it.
pub async fn profile(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    FlashNotice(notice): FlashNotice,
) -> Result<impl IntoResponse, AppError> {
    let user = ctx
        .current_user()
        .await
        .ok_or_else(|| AppError::unauthorized("Authentication required".to_string()))?;

    Ok(Json(json!({
        "user": UserSummary::from(user),
        "locale": ctx.locale().await,
        "time_zone": current_time_zone_or(&state.time_zone_config.default_time_zone),
        "preferred_locale": user.locale,
        "notice": notice,
    })))
}

/// Echoes the profile fields the caller may submit; admins may also set flags.
pub async fn profile_preview(Permitted(params): Permitted) -> impl IntoResponse {
    let permitted = params.permit_for_role(&["username", "locale", "time_zone"], &["banned", "admin"]);
    Json(json!({ "permitted": permitted }))
}

pub async fn show_user(
    Ctx(ctx): Ctx,
    Path(username_or_uid): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = ctx
        .find_user(&username_or_uid)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

    Ok(Json(UserSummary::from(&user)))
}

pub async fn admin_dashboard(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(json!({
        "dashboard": "admin",
        "user": UserSummary::from(&user),
    }))
}

pub async fn moderation(_admin: RequireAdmin, CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(json!({
        "moderation": true,
        "user": UserSummary::from(&user),
    }))
}
