#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, Response, header};
use axum::response::IntoResponse;
use axum_extra::extract::cookie::SignedCookieJar;
use gatehouse::gatehouse_config::{
    AppConfig, LocaleConfig, RouteConfig, SecurityHeadersConfig, SessionConfig, TimeZoneConfig,
};
use gatehouse::gatehouse_core::{FLASH_COOKIE, Notice};
use gatehouse::gatehouse_models::{User, UserId};
use gatehouse::middleware::session::session_cookie;
use gatehouse::modules::users::InMemoryUserRepository;
use gatehouse::router::init_router;
use gatehouse::state::AppState;
use http_body_util::BodyExt;

pub const SESSION_COOKIE: &str = "_gatehouse_session";

pub fn test_config() -> AppConfig {
    AppConfig {
        locale: LocaleConfig::new(["en", "fr", "de", "pt"], "en").unwrap(),
        time_zone: TimeZoneConfig::default(),
        session: SessionConfig::new(SESSION_COOKIE, &[42u8; 64]).unwrap(),
        routes: RouteConfig::default(),
        security: SecurityHeadersConfig::default(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self::with_config(users, test_config())
    }

    pub fn with_config(users: impl IntoIterator<Item = User>, config: AppConfig) -> Self {
        let users = Arc::new(InMemoryUserRepository::with_users(users));
        let state = AppState::new(users.clone(), config);
        Self {
            router: init_router(state.clone()),
            state,
            users,
        }
    }

    /// A `Cookie` header value carrying a validly signed session for `id`.
    pub fn session_for(&self, id: &str) -> String {
        let jar = SignedCookieJar::new(self.state.session_config.key.clone())
            .add(session_cookie(SESSION_COOKIE, id.to_string()));
        let response = jar.into_response();

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    pub fn signed_in(&self, user: &User) -> String {
        self.session_for(&user.id.to_string())
    }
}

pub fn user(username: &str) -> User {
    User {
        id: UserId::new(),
        username: username.to_string(),
        uid: format!("uid-{username}"),
        locale: None,
        time_zone: "UTC".to_string(),
        banned: false,
        admin: false,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Every `Set-Cookie` header whose cookie is named `name`.
pub fn set_cookies<'a>(headers: &'a HeaderMap, name: &str) -> Vec<&'a str> {
    let prefix = format!("{name}=");
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter(|v| v.starts_with(&prefix))
        .collect()
}

/// The notice set by a response, if any.
pub fn flash_notice(response: &Response<Body>) -> Option<Notice> {
    set_cookies(response.headers(), FLASH_COOKIE)
        .into_iter()
        .filter_map(|c| c.split(';').next())
        .filter_map(|pair| pair.split_once('=').map(|(_, value)| value))
        .find_map(Notice::decode)
}

/// Whether the response removes the session cookie.
pub fn clears_session(response: &Response<Body>) -> bool {
    set_cookies(response.headers(), SESSION_COOKIE)
        .iter()
        .any(|c| c.contains("Max-Age=0"))
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
