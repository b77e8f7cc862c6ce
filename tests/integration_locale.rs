mod common;

use axum::body::Body;
use axum::http::{Request, header};
use common::{TestApp, flash_notice, get, get_with_cookie, json_body, user};
use tower::ServiceExt;

fn get_with_language(uri: &str, accept_language: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .header(header::ACCEPT_LANGUAGE, accept_language);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn locale_of(app: &TestApp, request: Request<Body>) -> serde_json::Value {
    let response = app.router.clone().oneshot(request).await.unwrap();
    json_body(response).await["locale"].clone()
}

#[tokio::test]
async fn test_default_locale_without_any_signal() {
    let app = TestApp::new([]);
    assert_eq!(locale_of(&app, get("/")).await, "en");
}

#[tokio::test]
async fn test_explicit_parameter_wins() {
    let mut alice = user("alice");
    alice.locale = Some("de".to_string());
    let app = TestApp::new([alice.clone()]);
    let cookie = app.signed_in(&alice);

    let request = get_with_language("/profile?locale=fr", "pt", Some(&cookie));
    assert_eq!(locale_of(&app, request).await, "fr");
}

#[tokio::test]
async fn test_user_preference_beats_header() {
    let mut alice = user("alice");
    alice.locale = Some("de".to_string());
    let app = TestApp::new([alice.clone()]);
    let cookie = app.signed_in(&alice);

    let request = get_with_language("/profile", "fr", Some(&cookie));
    assert_eq!(locale_of(&app, request).await, "de");
}

#[tokio::test]
async fn test_header_region_falls_back_to_language() {
    let app = TestApp::new([]);

    let request = get_with_language("/?locale=xx", "pt-BR,en", None);
    assert_eq!(locale_of(&app, request).await, "pt");
}

#[tokio::test]
async fn test_invalid_parameter_skips_user_preference() {
    let mut alice = user("alice");
    alice.locale = Some("de".to_string());
    let app = TestApp::new([alice.clone()]);
    let cookie = app.signed_in(&alice);

    let request = get_with_language("/profile?locale=xx", "fr", Some(&cookie));
    assert_eq!(locale_of(&app, request).await, "fr");

    let request = get_with_cookie("/profile?locale=xx", &cookie);
    assert_eq!(locale_of(&app, request).await, "en");
}

#[tokio::test]
async fn test_unavailable_header_uses_default() {
    let app = TestApp::new([]);

    let request = get_with_language("/", "ja, zh-CN;q=0.8", None);
    assert_eq!(locale_of(&app, request).await, "en");
}

#[tokio::test]
async fn test_admin_notice_uses_negotiated_locale() {
    let mut bob = user("bob");
    bob.locale = Some("fr".to_string());
    let app = TestApp::new([bob.clone()]);
    let cookie = app.signed_in(&bob);

    let response = app
        .router
        .oneshot(get_with_cookie("/admin", &cookie))
        .await
        .unwrap();

    assert_eq!(
        flash_notice(&response).map(|n| n.message),
        Some("Vous n'êtes pas autorisé à accéder à cette page.".to_string())
    );
}

#[tokio::test]
async fn test_login_notice_uses_default_locale() {
    let app = TestApp::new([]);

    let response = app
        .router
        .oneshot(get_with_language("/profile?locale=fr", "fr", None))
        .await
        .unwrap();

    assert_eq!(
        flash_notice(&response).map(|n| n.message),
        Some("You need to sign in before continuing.".to_string())
    );
}

#[tokio::test]
async fn test_no_locale_leaks_out_of_request() {
    let app = TestApp::new([]);

    let request = get_with_language("/", "de", None);
    assert_eq!(locale_of(&app, request).await, "de");
    assert!(gatehouse::middleware::scope::current_locale().is_none());
}
