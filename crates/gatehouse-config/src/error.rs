use thiserror::Error;

/// Invalid startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("AVAILABLE_LOCALES must name at least one locale")]
    NoAvailableLocales,

    #[error("DEFAULT_LOCALE `{default}` is not one of the available locales ({available})")]
    DefaultLocaleUnavailable { default: String, available: String },

    #[error("DEFAULT_TIME_ZONE must not be blank")]
    BlankTimeZone,

    #[error("SESSION_SECRET must be at least 64 bytes long, got {0}")]
    SessionSecretTooShort(usize),

    #[error("{name} must start with `/`, got `{value}`")]
    InvalidPath { name: &'static str, value: String },
}
