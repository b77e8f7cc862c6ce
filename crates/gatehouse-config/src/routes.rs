//! Redirect destinations and route exemptions used by the access gate.
//!
//! # Environment Variables
//!
//! - `ROOT_PATH`: Home destination for authentication and admin denials (default: `/`)
//! - `BANNED_PATH`: Banned status page; exempt from the ban check (default: `/banned`)
//! - `PUBLIC_PATHS`: Comma-separated paths that skip the login check (default: `/`)
//!
//! The home destination should normally be public, otherwise an anonymous
//! visitor is redirected to a page that redirects them again.

use std::env;

use crate::error::ConfigError;
use crate::parse_list;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteConfig {
    pub root_path: String,
    pub banned_path: String,
    pub public_paths: Vec<String>,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            root_path: "/".to_string(),
            banned_path: "/banned".to_string(),
            public_paths: vec!["/".to_string()],
        }
    }
}

impl RouteConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let root_path = env::var("ROOT_PATH").unwrap_or(defaults.root_path);
        let banned_path = env::var("BANNED_PATH").unwrap_or(defaults.banned_path);
        let public_paths = env::var("PUBLIC_PATHS")
            .map(|value| parse_list(&value))
            .unwrap_or(defaults.public_paths);

        let config = Self {
            root_path,
            banned_path,
            public_paths,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_path("ROOT_PATH", &self.root_path)?;
        check_path("BANNED_PATH", &self.banned_path)?;
        for path in &self.public_paths {
            check_path("PUBLIC_PATHS", path)?;
        }
        Ok(())
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| p == path)
    }
}

fn check_path(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with('/') {
        Ok(())
    } else {
        Err(ConfigError::InvalidPath {
            name,
            value: value.to_string(),
        })
    }
}
