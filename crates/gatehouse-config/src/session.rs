//! Session cookie configuration.
//!
//! # Environment Variables
//!
//! - `SESSION_SECRET`: Key material for signing the session cookie, at least
//!   64 bytes. When unset a random key is generated, which invalidates every
//!   session on restart.
//! - `SESSION_COOKIE`: Name of the session cookie (default: `_gatehouse_session`)

use std::env;
use std::fmt;

use axum_extra::extract::cookie::Key;
use tracing::warn;

use crate::error::ConfigError;

pub const DEFAULT_SESSION_COOKIE: &str = "_gatehouse_session";

#[derive(Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub key: Key,
}

impl SessionConfig {
    pub fn new(cookie_name: impl Into<String>, secret: &[u8]) -> Result<Self, ConfigError> {
        let key = Key::try_from(secret)
            .map_err(|_| ConfigError::SessionSecretTooShort(secret.len()))?;

        Ok(Self {
            cookie_name: cookie_name.into(),
            key,
        })
    }

    /// A config with a freshly generated key. Sessions signed with it do not
    /// survive a restart.
    pub fn ephemeral(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            key: Key::generate(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let cookie_name =
            env::var("SESSION_COOKIE").unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.to_string());

        match env::var("SESSION_SECRET") {
            Ok(secret) => Self::new(cookie_name, secret.as_bytes()),
            Err(_) => {
                warn!("SESSION_SECRET is not set; generating an ephemeral session key");
                Ok(Self::ephemeral(cookie_name))
            }
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("cookie_name", &self.cookie_name)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
