//! Request parameters filtered through an allowlist.
//!
//! [`PermittedParams`] pairs the raw request parameters with the acting user.
//! It does not decide which keys a given user may submit; handlers pass the
//! keys they accept, typically choosing a longer list for admins.

use std::collections::{BTreeMap, HashMap};

use gatehouse_models::User;

#[derive(Debug, Clone, Default)]
pub struct PermittedParams {
    params: HashMap<String, String>,
    user: Option<User>,
}

impl PermittedParams {
    pub fn new(params: HashMap<String, String>, user: Option<User>) -> Self {
        Self { params, user }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The subset of parameters whose keys are in `allowed`.
    pub fn permit(&self, allowed: &[&str]) -> BTreeMap<String, String> {
        self.params
            .iter()
            .filter(|(key, _)| allowed.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Like [`permit`](Self::permit), but admins may also submit `admin_only`.
    pub fn permit_for_role(&self, allowed: &[&str], admin_only: &[&str]) -> BTreeMap<String, String> {
        let mut permitted = self.permit(allowed);
        if self.user.as_ref().is_some_and(User::is_admin) {
            permitted.extend(self.permit(admin_only));
        }
        permitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_models::UserId;

    fn params() -> HashMap<String, String> {
        [("username", "ada"), ("locale", "fr"), ("admin", "true")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn user(admin: bool) -> User {
        User {
            id: UserId::new(),
            username: "ada".to_string(),
            uid: "u1".to_string(),
            locale: None,
            time_zone: "UTC".to_string(),
            banned: false,
            admin,
        }
    }

    #[test]
    fn test_permit_filters_keys() {
        let permitted = PermittedParams::new(params(), None);
        let filtered = permitted.permit(&["username", "locale"]);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered["locale"], "fr");
        assert!(!filtered.contains_key("admin"));
        assert_eq!(permitted.get("admin"), Some("true"));
    }

    #[test]
    fn test_admin_only_keys() {
        let regular = PermittedParams::new(params(), Some(user(false)));
        let admin = PermittedParams::new(params(), Some(user(true)));

        assert!(
            !regular
                .permit_for_role(&["username"], &["admin"])
                .contains_key("admin")
        );
        assert!(
            admin
                .permit_for_role(&["username"], &["admin"])
                .contains_key("admin")
        );
        assert!(admin.user().is_some_and(User::is_admin));
    }
}
