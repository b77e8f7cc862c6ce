//! Security response header configuration.
//!
//! - `HSTS_ENABLED`: Emit `Strict-Transport-Security` (default: `false`)

use std::env;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SecurityHeadersConfig {
    pub hsts_enabled: bool,
}

impl SecurityHeadersConfig {
    pub fn from_env() -> Self {
        let hsts_enabled = env::var("HSTS_ENABLED")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self { hsts_enabled }
    }
}
