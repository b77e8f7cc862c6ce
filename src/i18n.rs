//! Translations for the notices the pipeline shows to users.
//!
//! Lookups use the ambient locale when one is active (see
//! [`crate::middleware::scope`]), then the default locale, then return the key
//! itself so a missing translation is visible rather than blank.

use std::collections::HashMap;

use gatehouse_models::Locale;

use crate::middleware::scope::current_locale;

pub const NOT_AUTHENTICATED: &str = "flash.errors.not_authenticated";
pub const NOT_ALLOWED: &str = "flash.errors.not_allowed";

const BUILTIN: &[(&str, &str, &str)] = &[
    ("en", NOT_AUTHENTICATED, "You need to sign in before continuing."),
    ("en", NOT_ALLOWED, "You are not allowed to access this page."),
    ("fr", NOT_AUTHENTICATED, "Vous devez vous connecter pour continuer."),
    ("fr", NOT_ALLOWED, "Vous n'êtes pas autorisé à accéder à cette page."),
    ("de", NOT_AUTHENTICATED, "Sie müssen sich anmelden, um fortzufahren."),
    ("de", NOT_ALLOWED, "Sie sind nicht berechtigt, diese Seite aufzurufen."),
    ("pt", NOT_AUTHENTICATED, "Você precisa entrar antes de continuar."),
    ("pt", NOT_ALLOWED, "Você não tem permissão para acessar esta página."),
];

#[derive(Clone, Debug)]
pub struct Catalog {
    default_locale: Locale,
    messages: HashMap<(String, String), String>,
}

impl Catalog {
    pub fn new(default_locale: Locale) -> Self {
        Self {
            default_locale,
            messages: HashMap::new(),
        }
    }

    /// A catalog preloaded with the pipeline's own notices.
    pub fn builtin(default_locale: Locale) -> Self {
        let mut catalog = Self::new(default_locale);
        for (locale, key, message) in BUILTIN {
            catalog.insert(locale, key, message);
        }
        catalog
    }

    pub fn insert(&mut self, locale: &str, key: &str, message: &str) {
        self.messages
            .insert((locale.to_string(), key.to_string()), message.to_string());
    }

    /// Translates `key` into the ambient locale.
    pub fn translate(&self, key: &str) -> String {
        let locale = current_locale().unwrap_or_else(|| self.default_locale.clone());
        self.translate_in(&locale, key)
    }

    pub fn translate_in(&self, locale: &Locale, key: &str) -> String {
        self.lookup(locale.as_str(), key)
            .or_else(|| self.lookup(&locale.language(), key))
            .or_else(|| self.lookup(self.default_locale.as_str(), key))
            .unwrap_or(key)
            .to_string()
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        self.messages
            .get(&(locale.to_string(), key.to_string()))
            .map(String::as_str)
    }
}
