//! Admin-only access, opted into per route.
//!
//! Two ways to apply the admin check:
//!
//! 1. Layer-based, for a whole router: `require_admin`
//! 2. Extractor-based, for a single handler: `RequireAdmin`
//!
//! Both rely on the request pipeline having already run, so the login check
//! has kept anonymous visitors out before the admin check is consulted.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::context::Ctx;
use crate::middleware::gate::{Denial, run_stage};
use crate::state::AppState;

/// Route layer that redirects signed-in non-admins home.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware, routing::get};
/// use gatehouse::middleware::admin::require_admin;
///
/// let admin_routes = Router::new()
///     .route("/", get(dashboard))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    req: Request,
    next: Next,
) -> Response {
    let user = ctx.current_user().await;
    match run_stage(state.admin_check.as_ref(), ctx.path(), user) {
        Ok(()) => next.run(req).await,
        Err(denial) => denial.into_response(),
    }
}

/// Extractor form of the admin check.
///
/// ```rust,ignore
/// pub async fn moderation(_admin: RequireAdmin, CurrentUser(user): CurrentUser) -> impl IntoResponse {
///     // Only reached by admins
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ctx(ctx) = Ctx::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let user = ctx.current_user().await;
        run_stage(state.admin_check.as_ref(), ctx.path(), user)
            .map(|()| RequireAdmin)
            .map_err(Denial::into_response)
    }
}
