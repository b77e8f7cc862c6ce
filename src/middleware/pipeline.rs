//! The request pipeline every route runs behind.
//!
//! For each request:
//!
//! 1. build the [`RequestContext`] from the session cookie, query parameters
//!    and `Accept-Language`, and put it in the request extensions
//! 2. run the access gate; a denial answers with a redirect and nothing below
//!    runs
//! 3. activate the negotiated locale around the rest of the request
//! 4. for a signed-in user, activate their time zone inside the locale scope
//! 5. run the handler
//!
//! If the session was cleared along the way (its user id no longer resolves),
//! the response removes the session cookie, whichever branch produced it.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    http::{Uri, header::ACCEPT_LANGUAGE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use gatehouse_models::{TimeZoneId, User};
use tracing::{debug, warn};

use crate::middleware::context::RequestContext;
use crate::middleware::scope::{with_locale, with_time_zone};
use crate::middleware::session::SessionState;
use crate::state::AppState;

pub async fn request_pipeline(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let session = Arc::new(SessionState::from_jar(
        &jar,
        &state.session_config.cookie_name,
    ));
    let accept_language = req
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let ctx = Arc::new(RequestContext::new(
        req.uri().path(),
        query_params(req.uri()),
        accept_language,
        session.clone(),
        state.users.clone(),
        state.negotiator.clone(),
    ));
    req.extensions_mut().insert(ctx.clone());

    let response = match state.gate.run(&ctx).await {
        Err(denial) => denial.into_response(),
        Ok(()) => run_scoped(&state, &ctx, next.run(req)).await,
    };

    (session.apply(jar), response).into_response()
}

/// Runs `handler` inside the request's locale scope and, when signed in,
/// its time zone scope.
pub async fn run_scoped<F>(state: &AppState, ctx: &RequestContext, handler: F) -> F::Output
where
    F: Future,
{
    let locale = ctx.locale().await;
    debug!(locale = %locale, path = %ctx.path(), "Locale negotiated");

    with_locale(locale, async {
        match ctx.current_user().await {
            Some(user) => {
                let time_zone = ctx
                    .establish_time_zone(user_time_zone(user, &state.time_zone_config.default_time_zone))
                    .clone();
                with_time_zone(time_zone, handler).await
            }
            None => handler.await,
        }
    })
    .await
}

fn user_time_zone(user: &User, default: &TimeZoneId) -> TimeZoneId {
    TimeZoneId::new(&user.time_zone).unwrap_or_else(|| {
        warn!(user_id = %user.id, "User has a blank time zone; using the default");
        default.clone()
    })
}

fn query_params(uri: &Uri) -> HashMap<String, String> {
    match Query::<HashMap<String, String>>::try_from_uri(uri) {
        Ok(Query(params)) => params,
        Err(err) => {
            debug!(error = %err, "Ignoring malformed query string");
            HashMap::new()
        }
    }
}
