//! Access gate: ordered checks that may short-circuit a request.
//!
//! The gate is an explicit list of named [`GateStage`]s run in order before
//! any handler. Each stage decides for itself which paths it skips. The
//! standard list is:
//!
//! 1. [`RequireLogin`]: anonymous visitors are sent home with a
//!    "not authenticated" notice (public paths are skipped)
//! 2. [`CheckBanned`]: banned users are sent to the banned page (the banned
//!    page itself is skipped)
//!
//! [`CheckAdmin`] is not part of the standard list; handlers opt into it
//! through the `require_admin` route layer or the `RequireAdmin` extractor.

use std::sync::Arc;

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use gatehouse_config::RouteConfig;
use gatehouse_core::Notice;
use gatehouse_models::User;
use tracing::{debug, info};

use crate::i18n::{self, Catalog};
use crate::metrics::track_gate_denial;
use crate::middleware::context::RequestContext;
use crate::middleware::flash::flash_cookie;

/// A short-circuited request: where to send the user and what to tell them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    pub stage: &'static str,
    pub location: String,
    pub notice: Option<Notice>,
}

impl IntoResponse for Denial {
    fn into_response(self) -> Response {
        let redirect = Redirect::to(&self.location);
        match self.notice {
            Some(notice) => (CookieJar::new().add(flash_cookie(&notice)), redirect).into_response(),
            None => redirect.into_response(),
        }
    }
}

pub trait GateStage: Send + Sync {
    fn name(&self) -> &'static str;

    /// Paths this stage does not apply to.
    fn exempts(&self, _path: &str) -> bool {
        false
    }

    fn check(&self, user: Option<&User>) -> Result<(), Denial>;
}

pub struct RequireLogin {
    routes: RouteConfig,
    catalog: Arc<Catalog>,
}

impl RequireLogin {
    pub fn new(routes: &RouteConfig, catalog: Arc<Catalog>) -> Self {
        Self {
            routes: routes.clone(),
            catalog,
        }
    }
}

impl GateStage for RequireLogin {
    fn name(&self) -> &'static str {
        "require_login"
    }

    fn exempts(&self, path: &str) -> bool {
        self.routes.is_public(path)
    }

    fn check(&self, user: Option<&User>) -> Result<(), Denial> {
        match user {
            Some(_) => Ok(()),
            None => Err(Denial {
                stage: self.name(),
                location: self.routes.root_path.clone(),
                notice: Some(Notice::error(self.catalog.translate(i18n::NOT_AUTHENTICATED))),
            }),
        }
    }
}

pub struct CheckBanned {
    banned_path: String,
}

impl CheckBanned {
    pub fn new(routes: &RouteConfig) -> Self {
        Self {
            banned_path: routes.banned_path.clone(),
        }
    }
}

impl GateStage for CheckBanned {
    fn name(&self) -> &'static str {
        "check_banned"
    }

    fn exempts(&self, path: &str) -> bool {
        path == self.banned_path
    }

    fn check(&self, user: Option<&User>) -> Result<(), Denial> {
        match user {
            Some(user) if user.is_banned() => Err(Denial {
                stage: self.name(),
                location: self.banned_path.clone(),
                notice: None,
            }),
            _ => Ok(()),
        }
    }
}

pub struct CheckAdmin {
    root_path: String,
    catalog: Arc<Catalog>,
}

impl CheckAdmin {
    pub fn new(routes: &RouteConfig, catalog: Arc<Catalog>) -> Self {
        Self {
            root_path: routes.root_path.clone(),
            catalog,
        }
    }
}

impl GateStage for CheckAdmin {
    fn name(&self) -> &'static str {
        "check_admin"
    }

    /// Anonymous requests pass; the login check is what keeps them out.
    fn check(&self, user: Option<&User>) -> Result<(), Denial> {
        match user {
            Some(user) if !user.is_admin() => Err(Denial {
                stage: self.name(),
                location: self.root_path.clone(),
                notice: Some(Notice::error(self.catalog.translate(i18n::NOT_ALLOWED))),
            }),
            _ => Ok(()),
        }
    }
}

/// The ordered list of stages applied to every request.
pub struct AccessGate {
    stages: Vec<Arc<dyn GateStage>>,
}

impl AccessGate {
    pub fn new(stages: Vec<Arc<dyn GateStage>>) -> Self {
        Self { stages }
    }

    pub fn standard(routes: &RouteConfig, catalog: Arc<Catalog>) -> Self {
        let stages: Vec<Arc<dyn GateStage>> = vec![
            Arc::new(RequireLogin::new(routes, catalog)),
            Arc::new(CheckBanned::new(routes)),
        ];
        Self::new(stages)
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Resolves the request's identity and runs every stage against it.
    pub async fn run(&self, ctx: &RequestContext) -> Result<(), Denial> {
        let user = ctx.current_user().await;
        self.check(ctx.path(), user)
    }

    pub fn check(&self, path: &str, user: Option<&User>) -> Result<(), Denial> {
        for stage in &self.stages {
            if stage.exempts(path) {
                debug!(stage = stage.name(), path = %path, "Gate stage skipped");
                continue;
            }
            run_stage(stage.as_ref(), path, user)?;
        }
        Ok(())
    }
}

/// Runs a single stage, logging and counting a denial.
pub fn run_stage(stage: &dyn GateStage, path: &str, user: Option<&User>) -> Result<(), Denial> {
    stage.check(user).inspect_err(|denial| {
        info!(
            stage = denial.stage,
            path = %path,
            user_id = ?user.map(|u| u.id),
            location = %denial.location,
            "Request denied by access gate"
        );
        track_gate_denial(denial.stage);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{StatusCode, header};
    use gatehouse_models::{AvailableLocales, UserId};

    fn catalog() -> Arc<Catalog> {
        let en = AvailableLocales::new(["en"]).get("en").unwrap();
        Arc::new(Catalog::builtin(en))
    }

    fn user(banned: bool, admin: bool) -> User {
        User {
            id: UserId::new(),
            username: "ada".to_string(),
            uid: "u1".to_string(),
            locale: None,
            time_zone: "UTC".to_string(),
            banned,
            admin,
        }
    }

    fn gate() -> AccessGate {
        AccessGate::standard(&RouteConfig::default(), catalog())
    }

    #[test]
    fn test_standard_order() {
        assert_eq!(gate().stage_names(), vec!["require_login", "check_banned"]);
    }

    #[test]
    fn test_anonymous_redirected_home_with_notice() {
        let denial = gate().check("/profile", None).unwrap_err();

        assert_eq!(denial.stage, "require_login");
        assert_eq!(denial.location, "/");
        assert_eq!(
            denial.notice,
            Some(Notice::error("You need to sign in before continuing."))
        );
    }

    #[test]
    fn test_anonymous_allowed_on_public_path() {
        assert!(gate().check("/", None).is_ok());
    }

    #[test]
    fn test_configured_public_paths_skip_login_check() {
        let routes = RouteConfig {
            public_paths: vec!["/".to_string(), "/about".to_string()],
            ..RouteConfig::default()
        };
        let gate = AccessGate::standard(&routes, catalog());

        assert!(gate.check("/about", None).is_ok());
        assert!(gate.check("/about/team", None).is_err());
    }

    #[test]
    fn test_banned_user_redirected_except_on_banned_page() {
        let banned = user(true, false);

        let denial = gate().check("/profile", Some(&banned)).unwrap_err();
        assert_eq!(denial.stage, "check_banned");
        assert_eq!(denial.location, "/banned");
        assert!(denial.notice.is_none());

        assert!(gate().check("/banned", Some(&banned)).is_ok());
    }

    #[test]
    fn test_anonymous_never_reaches_ban_check() {
        let denial = gate().check("/banned", None).unwrap_err();
        assert_eq!(denial.stage, "require_login");
    }

    #[test]
    fn test_regular_user_passes() {
        assert!(gate().check("/profile", Some(&user(false, false))).is_ok());
    }

    #[test]
    fn test_admin_check() {
        let check = CheckAdmin::new(&RouteConfig::default(), catalog());

        assert!(check.check(None).is_ok());
        assert!(check.check(Some(&user(false, true))).is_ok());

        let denial = check.check(Some(&user(false, false))).unwrap_err();
        assert_eq!(denial.location, "/");
        assert_eq!(
            denial.notice,
            Some(Notice::error("You are not allowed to access this page."))
        );
    }

    #[test]
    fn test_denial_response_redirects_and_sets_flash() {
        let response = gate().check("/profile", None).unwrap_err().into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("flash="));
    }

    #[test]
    fn test_denial_without_notice_sets_no_cookie() {
        let response = gate()
            .check("/profile", Some(&user(true, false)))
            .unwrap_err()
            .into_response();

        assert_eq!(response.headers()[header::LOCATION], "/banned");
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}
