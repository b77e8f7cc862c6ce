//! Locale and time zone value types.
//!
//! A [`Locale`] can only be obtained from an [`AvailableLocales`] set, so any
//! locale that reaches a request context is known to be available.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A language tag that belongs to the process-wide available set.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Locale(Arc<str>);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag, lowercased (`pt` for `pt-BR`).
    pub fn language(&self) -> String {
        primary_subtag(&self.0)
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Locale({})", self.0)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl PartialEq<str> for Locale {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Locale {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Lowercased primary subtag of a language tag; accepts `-` and `_` separators.
pub fn primary_subtag(tag: &str) -> String {
    tag.split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// The fixed set of locales the application can serve.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailableLocales {
    locales: Vec<Locale>,
}

impl AvailableLocales {
    /// Builds the set, trimming tags and dropping blanks and duplicates while
    /// keeping the configured order.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut locales: Vec<Locale> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() || locales.iter().any(|l| l == tag) {
                continue;
            }
            locales.push(Locale(Arc::from(tag)));
        }
        Self { locales }
    }

    /// Exact, case-sensitive membership lookup.
    pub fn get(&self, tag: &str) -> Option<Locale> {
        self.locales.iter().find(|l| *l == tag).cloned()
    }

    /// ASCII case-insensitive lookup, for tags that come from HTTP headers.
    pub fn get_ignore_case(&self, tag: &str) -> Option<Locale> {
        self.locales
            .iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(tag))
            .cloned()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter()
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

/// An IANA-style time zone identifier such as `Europe/Paris`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeZoneId(String);

impl TimeZoneId {
    /// Returns `None` for blank identifiers.
    pub fn new(id: impl AsRef<str>) -> Option<Self> {
        let id = id.as_ref().trim();
        (!id.is_empty()).then(|| Self(id.to_string()))
    }

    pub fn utc() -> Self {
        Self("UTC".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TimeZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeZoneId({})", self.0)
    }
}

impl fmt::Display for TimeZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_locales_dedupes_and_trims() {
        let available = AvailableLocales::new([" en", "fr", "en", "", "pt-BR "]);
        let tags: Vec<&str> = available.iter().map(Locale::as_str).collect();

        assert_eq!(tags, vec!["en", "fr", "pt-BR"]);
    }

    #[test]
    fn test_get_is_case_sensitive() {
        let available = AvailableLocales::new(["en", "pt-BR"]);

        assert_eq!(available.get("pt-BR").unwrap(), "pt-BR");
        assert!(available.get("pt-br").is_none());
        assert_eq!(available.get_ignore_case("pt-br").unwrap(), "pt-BR");
        assert!(!available.contains("xx"));
    }

    #[test]
    fn test_primary_subtag() {
        assert_eq!(primary_subtag("pt-BR"), "pt");
        assert_eq!(primary_subtag("EN_gb"), "en");
        assert_eq!(primary_subtag("de"), "de");
    }

    #[test]
    fn test_time_zone_rejects_blank() {
        assert!(TimeZoneId::new("   ").is_none());
        assert_eq!(
            TimeZoneId::new(" Europe/Paris ").unwrap().as_str(),
            "Europe/Paris"
        );
        assert_eq!(TimeZoneId::utc().to_string(), "UTC");
    }

    #[test]
    fn test_locale_serializes_as_tag() {
        let locale = AvailableLocales::new(["fr"]).get("fr").unwrap();
        assert_eq!(serde_json::to_string(&locale).unwrap(), "\"fr\"");
    }
}
