//! Ambient locale and time zone for the request being handled.
//!
//! Values are task-local: [`with_locale`] and [`with_time_zone`] make a value
//! current for exactly the duration of the wrapped future, and the previous
//! value (or none) is back in place once the future finishes, returns early,
//! errors, panics, or is dropped. Concurrent requests run on separate tasks
//! and never see each other's values.

use std::future::Future;

use gatehouse_models::{Locale, TimeZoneId};

tokio::task_local! {
    static CURRENT_LOCALE: Locale;
    static CURRENT_TIME_ZONE: TimeZoneId;
}

pub async fn with_locale<F>(locale: Locale, future: F) -> F::Output
where
    F: Future,
{
    CURRENT_LOCALE.scope(locale, future).await
}

pub async fn with_time_zone<F>(time_zone: TimeZoneId, future: F) -> F::Output
where
    F: Future,
{
    CURRENT_TIME_ZONE.scope(time_zone, future).await
}

/// The locale activated by the innermost enclosing [`with_locale`], if any.
pub fn current_locale() -> Option<Locale> {
    CURRENT_LOCALE.try_with(Locale::clone).ok()
}

pub fn current_locale_or(default: &Locale) -> Locale {
    current_locale().unwrap_or_else(|| default.clone())
}

/// The time zone activated by the innermost enclosing [`with_time_zone`], if any.
pub fn current_time_zone() -> Option<TimeZoneId> {
    CURRENT_TIME_ZONE.try_with(TimeZoneId::clone).ok()
}

pub fn current_time_zone_or(default: &TimeZoneId) -> TimeZoneId {
    current_time_zone().unwrap_or_else(|| default.clone())
}
