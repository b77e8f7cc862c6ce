//! The identity record consumed by the request pipeline.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user as seen by the pipeline.
///
/// The record is owned by the persistence layer; the pipeline reads it once
/// per request and never writes it back.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Public handle, accepted anywhere a username is.
    pub uid: String,
    /// Preferred language tag. Not guaranteed to be an available locale.
    pub locale: Option<String>,
    pub time_zone: String,
    pub banned: bool,
    pub admin: bool,
}

impl User {
    pub fn is_banned(&self) -> bool {
        self.banned
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// The stored locale preference, if it is not blank.
    pub fn preferred_locale(&self) -> Option<&str> {
        self.locale
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }
}

/// Public view of a user returned by lookups.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub uid: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            uid: user.uid.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(locale: Option<&str>) -> User {
        User {
            id: UserId::new(),
            username: "ada".to_string(),
            uid: "ada-1815".to_string(),
            locale: locale.map(str::to_string),
            time_zone: "Europe/London".to_string(),
            banned: false,
            admin: false,
        }
    }

    #[test]
    fn test_preferred_locale_skips_blank_values() {
        assert_eq!(user(Some("fr")).preferred_locale(), Some("fr"));
        assert_eq!(user(Some("  ")).preferred_locale(), None);
        assert_eq!(user(None).preferred_locale(), None);
    }

    #[test]
    fn test_summary_hides_flags() {
        let user = user(None);
        let json = serde_json::to_value(UserSummary::from(&user)).unwrap();

        assert_eq!(json["username"], "ada");
        assert!(json.get("banned").is_none());
        assert!(json.get("admin").is_none());
    }
}
