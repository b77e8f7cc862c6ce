use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::pipeline::request_pipeline;
use crate::middleware::security_headers::apply_security_headers;
use crate::modules::pages::router::init_pages_router;
use crate::state::AppState;
use axum::{Router, middleware};

pub fn init_router(state: AppState) -> Router {
    let app = init_pages_router(state.clone())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_pipeline,
        ))
        .with_state(state.clone());

    apply_security_headers(app, &state.security_config)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
