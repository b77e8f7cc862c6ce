mod common;

use axum::http::StatusCode;
use common::{TestApp, get, test_config};
use tower::ServiceExt;

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let app = TestApp::new([]);

    let ok = app.router.clone().oneshot(get("/")).await.unwrap();
    let redirect = app.router.oneshot(get("/profile")).await.unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(redirect.status(), StatusCode::SEE_OTHER);

    for response in [&ok, &redirect] {
        let headers = response.headers();
        assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-xss-protection"], "1; mode=block");
        assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
        assert!(!headers.contains_key("strict-transport-security"));
    }
}

#[tokio::test]
async fn test_hsts_when_enabled() {
    let mut config = test_config();
    config.security.hsts_enabled = true;
    let app = TestApp::with_config([], config);

    let response = app.router.oneshot(get("/")).await.unwrap();

    assert_eq!(
        response.headers()["strict-transport-security"],
        "max-age=31536000; includeSubDomains"
    );
}
