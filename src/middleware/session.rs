//! Session cookie access.
//!
//! The session is a single signed cookie whose value is the acting user's id.
//! Issuing it belongs to the login flow; the pipeline only reads it and, when
//! the id no longer resolves to a user, clears it.

use std::sync::atomic::{AtomicBool, Ordering};

use axum_extra::extract::cookie::{Cookie, SignedCookieJar};
use tracing::debug;

/// The session as seen by one request.
#[derive(Debug)]
pub struct SessionState {
    cookie_name: String,
    user_id: Option<String>,
    cleared: AtomicBool,
}

impl SessionState {
    pub fn new(cookie_name: impl Into<String>, user_id: Option<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            user_id: user_id.filter(|id| !id.trim().is_empty()),
            cleared: AtomicBool::new(false),
        }
    }

    /// Reads the session from the signed jar. Cookies with a bad signature are
    /// dropped by the jar and read as no session at all.
    pub fn from_jar(jar: &SignedCookieJar, cookie_name: &str) -> Self {
        let user_id = jar.get(cookie_name).map(|c| c.value().to_string());
        Self::new(cookie_name, user_id)
    }

    /// The stored user id, unless the session has been cleared.
    pub fn user_id(&self) -> Option<&str> {
        if self.is_cleared() {
            return None;
        }
        self.user_id.as_deref()
    }

    pub fn clear(&self) {
        if !self.cleared.swap(true, Ordering::SeqCst) {
            debug!(cookie = %self.cookie_name, "Session cleared");
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared.load(Ordering::SeqCst)
    }

    /// Returns the jar to send back: unchanged, or with the session cookie
    /// removed when the session was cleared during this request.
    pub fn apply(&self, jar: SignedCookieJar) -> SignedCookieJar {
        if self.is_cleared() {
            jar.remove(session_cookie(&self.cookie_name, String::new()))
        } else {
            jar
        }
    }
}

/// Builds the session cookie for `value`. Used by the login flow and by tests.
pub fn session_cookie(name: &str, value: String) -> Cookie<'static> {
    Cookie::build((name.to_string(), value))
        .path("/")
        .http_only(true)
        .same_site(axum_extra::extract::cookie::SameSite::Lax)
        .build()
}
