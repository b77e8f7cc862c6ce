//! # Gatehouse Config
//!
//! Configuration for the request pipeline, loaded from environment variables:
//!
//! - [`locale`]: Available locales, default locale and default time zone
//! - [`session`]: Session cookie name and signing key
//! - [`routes`]: Redirect destinations and gate exemptions
//! - [`security`]: Security response headers
//!
//! All of it is read once at startup and is read-only while requests are
//! being served.
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! ```

pub mod error;
pub mod locale;
pub mod routes;
pub mod security;
pub mod session;

pub use error::ConfigError;
pub use locale::{LocaleConfig, TimeZoneConfig};
pub use routes::RouteConfig;
pub use security::SecurityHeadersConfig;
pub use session::SessionConfig;

/// Every configuration section the pipeline needs.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub locale: LocaleConfig,
    pub time_zone: TimeZoneConfig,
    pub session: SessionConfig,
    pub routes: RouteConfig,
    pub security: SecurityHeadersConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            locale: LocaleConfig::from_env()?,
            time_zone: TimeZoneConfig::from_env()?,
            session: SessionConfig::from_env()?,
            routes: RouteConfig::from_env()?,
            security: SecurityHeadersConfig::from_env(),
        })
    }
}

/// Splits a comma-separated environment value, dropping blank entries.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
