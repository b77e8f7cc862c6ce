//! Locale negotiation.
//!
//! The effective locale of a request is the first hit in this chain:
//!
//! 1. the `locale` request parameter, or, when that is absent or blank, the
//!    signed-in user's stored preference. Whichever of the two comes first is
//!    the only candidate checked against the available set; an unavailable
//!    parameter does not fall back to the user's preference.
//! 2. an exact match for the most preferred `Accept-Language` tag
//! 3. a language-only match for any `Accept-Language` tag, in rank order
//!
//! When nothing matches the negotiator returns `None` and the caller uses the
//! configured default.

use std::cmp::Ordering;
use std::sync::Arc;

use gatehouse_config::LocaleConfig;
use gatehouse_models::{AvailableLocales, Locale, User, primary_subtag};
use tracing::debug;

/// Matches ranked `Accept-Language` tags against the available locales.
pub trait LanguageMatcher: Send + Sync {
    /// Parses a raw header into tags, most preferred first.
    fn ranked_tags(&self, header: &str) -> Vec<String>;

    fn preferred_match(&self, ranked: &[String], available: &AvailableLocales) -> Option<Locale>;

    fn compatible_match(&self, ranked: &[String], available: &AvailableLocales) -> Option<Locale>;
}

/// Default [`LanguageMatcher`] following the usual `Accept-Language` rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptLanguage;

impl LanguageMatcher for AcceptLanguage {
    fn ranked_tags(&self, header: &str) -> Vec<String> {
        let mut weighted: Vec<(String, f32)> = header
            .split(',')
            .filter_map(|entry| {
                let mut parts = entry.split(';');
                let tag = parts.next()?.trim();
                if tag.is_empty() || tag == "*" {
                    return None;
                }

                let quality = parts
                    .find_map(|param| {
                        let (name, value) = param.trim().split_once('=')?;
                        name.trim()
                            .eq_ignore_ascii_case("q")
                            .then(|| value.trim().parse::<f32>().unwrap_or(0.0))
                    })
                    .unwrap_or(1.0);

                (quality > 0.0).then(|| (tag.to_string(), quality))
            })
            .collect();

        // Stable sort keeps header order between equal weights.
        weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        weighted.into_iter().map(|(tag, _)| tag).collect()
    }

    fn preferred_match(&self, ranked: &[String], available: &AvailableLocales) -> Option<Locale> {
        ranked
            .first()
            .and_then(|tag| available.get_ignore_case(tag))
    }

    fn compatible_match(&self, ranked: &[String], available: &AvailableLocales) -> Option<Locale> {
        ranked.iter().find_map(|tag| {
            let language = primary_subtag(tag);
            available
                .iter()
                .find(|locale| {
                    locale.as_str().eq_ignore_ascii_case(tag) || locale.language() == language
                })
                .cloned()
        })
    }
}

/// Runs the negotiation chain against the process-wide locale configuration.
#[derive(Clone)]
pub struct LocaleNegotiator {
    config: LocaleConfig,
    matcher: Arc<dyn LanguageMatcher>,
}

impl LocaleNegotiator {
    pub fn new(config: LocaleConfig, matcher: Arc<dyn LanguageMatcher>) -> Self {
        Self { config, matcher }
    }

    pub fn available(&self) -> &AvailableLocales {
        &self.config.available
    }

    pub fn default_locale(&self) -> &Locale {
        &self.config.default_locale
    }

    pub fn negotiate(
        &self,
        explicit: Option<&str>,
        user: Option<&User>,
        accept_language: Option<&str>,
    ) -> Option<Locale> {
        let requested = explicit
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .or_else(|| user.and_then(User::preferred_locale));

        if let Some(tag) = requested {
            if let Some(locale) = self.config.available.get(tag) {
                return Some(locale);
            }
            debug!(requested = %tag, "Requested locale is not available");
        }

        let ranked = accept_language
            .map(|header| self.matcher.ranked_tags(header))
            .unwrap_or_default();
        if ranked.is_empty() {
            return None;
        }

        self.matcher
            .preferred_match(&ranked, &self.config.available)
            .or_else(|| self.matcher.compatible_match(&ranked, &self.config.available))
    }

    pub fn negotiate_or_default(
        &self,
        explicit: Option<&str>,
        user: Option<&User>,
        accept_language: Option<&str>,
    ) -> Locale {
        self.negotiate(explicit, user, accept_language)
            .unwrap_or_else(|| self.config.default_locale.clone())
    }
}
