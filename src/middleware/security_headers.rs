//! Security headers added to every response.

use axum::{
    Router,
    http::{HeaderValue, header},
    response::Response,
};
use gatehouse_config::SecurityHeadersConfig;
use tower_http::set_header::SetResponseHeaderLayer;

const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";

/// Adds the security headers to `router`. Headers a handler already set are
/// left alone.
pub fn apply_security_headers<S>(router: Router<S>, config: &SecurityHeadersConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let hsts = config
        .hsts_enabled
        .then(|| HeaderValue::from_static(HSTS_VALUE));

    router
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            move |_: &Response| hsts.clone(),
        ))
}
