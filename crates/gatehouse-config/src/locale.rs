//! Locale and time zone configuration.
//!
//! # Environment Variables
//!
//! - `AVAILABLE_LOCALES`: Comma-separated locale tags (default: `en,fr,de,pt`)
//! - `DEFAULT_LOCALE`: Locale used when negotiation finds nothing (default: `en`)
//! - `DEFAULT_TIME_ZONE`: Process default time zone (default: `UTC`)
//!
//! The default locale must be one of the available locales; loading fails
//! otherwise so a misconfiguration is caught at startup rather than per
//! request.

use std::env;

use gatehouse_models::{AvailableLocales, Locale, TimeZoneId};

use crate::error::ConfigError;
use crate::parse_list;

pub const DEFAULT_AVAILABLE_LOCALES: &str = "en,fr,de,pt";
pub const DEFAULT_LOCALE: &str = "en";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleConfig {
    pub available: AvailableLocales,
    pub default_locale: Locale,
}

impl LocaleConfig {
    pub fn new<I, S>(available: I, default_locale: &str) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let available = AvailableLocales::new(available);
        if available.is_empty() {
            return Err(ConfigError::NoAvailableLocales);
        }

        let default_locale = available.get(default_locale.trim()).ok_or_else(|| {
            ConfigError::DefaultLocaleUnavailable {
                default: default_locale.to_string(),
                available: available
                    .iter()
                    .map(Locale::as_str)
                    .collect::<Vec<_>>()
                    .join(","),
            }
        })?;

        Ok(Self {
            available,
            default_locale,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let available = env::var("AVAILABLE_LOCALES")
            .unwrap_or_else(|_| DEFAULT_AVAILABLE_LOCALES.to_string());
        let default_locale = env::var("DEFAULT_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string());

        Self::new(parse_list(&available), &default_locale)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeZoneConfig {
    pub default_time_zone: TimeZoneId,
}

impl Default for TimeZoneConfig {
    fn default() -> Self {
        Self {
            default_time_zone: TimeZoneId::utc(),
        }
    }
}

impl TimeZoneConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("DEFAULT_TIME_ZONE") {
            Ok(value) => TimeZoneId::new(&value)
                .map(|default_time_zone| Self { default_time_zone })
                .ok_or(ConfigError::BlankTimeZone),
            Err(_) => Ok(Self::default()),
        }
    }
}
