//! Per-request context and the extractors handlers use to read it.
//!
//! [`RequestContext`] is created by the pipeline for every request and stored
//! in the request extensions. It owns the request's session view and the
//! memoized identity, locale, time zone and permitted parameters. Nothing in
//! it is shared with other requests.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use axum::{extract::FromRequestParts, http::request::Parts};
use gatehouse_core::AppError;
use gatehouse_models::{Locale, TimeZoneId, User, UserSummary};
use tokio::sync::OnceCell;

use crate::middleware::identity::IdentityResolver;
use crate::middleware::locale::LocaleNegotiator;
use crate::middleware::session::SessionState;
use crate::modules::users::UserRepository;
use crate::utils::PermittedParams;

pub struct RequestContext {
    path: String,
    params: HashMap<String, String>,
    accept_language: Option<String>,
    identity: IdentityResolver,
    users: Arc<dyn UserRepository>,
    negotiator: Arc<LocaleNegotiator>,
    locale: OnceCell<Locale>,
    time_zone: OnceLock<TimeZoneId>,
    permitted: OnceCell<PermittedParams>,
}

impl RequestContext {
    pub fn new(
        path: impl Into<String>,
        params: HashMap<String, String>,
        accept_language: Option<String>,
        session: Arc<SessionState>,
        users: Arc<dyn UserRepository>,
        negotiator: Arc<LocaleNegotiator>,
    ) -> Self {
        Self {
            path: path.into(),
            params,
            accept_language,
            identity: IdentityResolver::new(session, users.clone()),
            users,
            negotiator,
            locale: OnceCell::new(),
            time_zone: OnceLock::new(),
            permitted: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn session(&self) -> &SessionState {
        self.identity.session()
    }

    pub async fn current_user(&self) -> Option<&User> {
        self.identity.resolve().await
    }

    pub async fn logged_in(&self) -> bool {
        self.identity.logged_in().await
    }

    /// The negotiated locale, computed on first use and fixed afterwards.
    pub async fn locale(&self) -> Locale {
        self.locale
            .get_or_init(|| async {
                let user = self.current_user().await;
                self.negotiator.negotiate_or_default(
                    self.param("locale"),
                    user,
                    self.accept_language.as_deref(),
                )
            })
            .await
            .clone()
    }

    /// Records the time zone the request is handled in. Only the first call
    /// has any effect.
    pub fn establish_time_zone(&self, time_zone: TimeZoneId) -> &TimeZoneId {
        self.time_zone.get_or_init(|| time_zone)
    }

    /// The time zone established for this request; `None` for anonymous
    /// requests, which run in the process default.
    pub fn time_zone(&self) -> Option<&TimeZoneId> {
        self.time_zone.get()
    }

    pub async fn permitted_params(&self) -> &PermittedParams {
        self.permitted
            .get_or_init(|| async {
                let user = self.current_user().await.cloned();
                PermittedParams::new(self.params.clone(), user)
            })
            .await
    }

    /// Looks up another user by username or uid.
    pub async fn find_user(&self, username_or_uid: &str) -> Result<Option<User>, AppError> {
        let user = self.users.find_by_username_or_uid(username_or_uid).await?;
        Ok(user)
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("path", &self.path)
            .field("user", &self.identity.cached().map(UserSummary::from))
            .field("locale", &self.locale.get())
            .field("time_zone", &self.time_zone.get())
            .finish_non_exhaustive()
    }
}

fn context_from_parts(parts: &Parts) -> Result<Arc<RequestContext>, AppError> {
    parts
        .extensions
        .get::<Arc<RequestContext>>()
        .cloned()
        .ok_or_else(|| AppError::internal(anyhow::anyhow!("request pipeline is not installed")))
}

/// The request context itself.
#[derive(Debug, Clone)]
pub struct Ctx(pub Arc<RequestContext>);

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        context_from_parts(parts).map(Ctx)
    }
}

/// The acting user, if the request is authenticated.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = context_from_parts(parts)?;
        let user = ctx.current_user().await.cloned();
        Ok(MaybeUser(user))
    }
}

/// The acting user. Rejects with 401 on routes the login check lets through
/// anonymously.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = context_from_parts(parts)?;
        let user = ctx
            .current_user()
            .await
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Authentication required".to_string()))?;
        Ok(CurrentUser(user))
    }
}

/// The request's permitted parameters.
#[derive(Debug, Clone)]
pub struct Permitted(pub PermittedParams);

impl<S> FromRequestParts<S> for Permitted
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = context_from_parts(parts)?;
        let permitted = ctx.permitted_params().await.clone();
        Ok(Permitted(permitted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::locale::AcceptLanguage;
    use crate::modules::users::InMemoryUserRepository;
    use gatehouse_config::LocaleConfig;
    use gatehouse_models::UserId;

    fn user(locale: Option<&str>) -> User {
        User {
            id: UserId::new(),
            username: "ada".to_string(),
            uid: "u1".to_string(),
            locale: locale.map(str::to_string),
            time_zone: "Europe/Paris".to_string(),
            banned: false,
            admin: false,
        }
    }

    fn context(
        repo: Arc<InMemoryUserRepository>,
        session_user: Option<&User>,
        params: &[(&str, &str)],
        accept_language: Option<&str>,
    ) -> RequestContext {
        let config = LocaleConfig::new(["en", "fr", "de"], "en").unwrap();
        let negotiator = Arc::new(LocaleNegotiator::new(config, Arc::new(AcceptLanguage)));
        let session = Arc::new(SessionState::new(
            "_s",
            session_user.map(|u| u.id.to_string()),
        ));
        let params = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        RequestContext::new(
            "/profile",
            params,
            accept_language.map(str::to_string),
            session,
            repo,
            negotiator,
        )
    }

    #[tokio::test]
    async fn test_locale_is_memoized() {
        let ada = user(Some("de"));
        let repo = Arc::new(InMemoryUserRepository::with_users([ada.clone()]));
        let ctx = context(repo.clone(), Some(&ada), &[], Some("fr"));

        assert_eq!(ctx.locale().await, "de");
        assert_eq!(ctx.locale().await, "de");
        assert_eq!(repo.lookups(), 1);
    }

    #[tokio::test]
    async fn test_locale_parameter_and_default() {
        let repo = Arc::new(InMemoryUserRepository::new());

        let ctx = context(repo.clone(), None, &[("locale", "fr")], None);
        assert_eq!(ctx.locale().await, "fr");

        let ctx = context(repo, None, &[("locale", "xx")], Some("ja"));
        assert_eq!(ctx.locale().await, "en");
    }

    #[tokio::test]
    async fn test_time_zone_is_established_once() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let ctx = context(repo, None, &[], None);
        assert!(ctx.time_zone().is_none());

        let paris = TimeZoneId::new("Europe/Paris").unwrap();
        let tokyo = TimeZoneId::new("Asia/Tokyo").unwrap();
        ctx.establish_time_zone(paris.clone());
        ctx.establish_time_zone(tokyo);

        assert_eq!(ctx.time_zone(), Some(&paris));
    }

    #[tokio::test]
    async fn test_permitted_params_carry_user() {
        let ada = user(None);
        let repo = Arc::new(InMemoryUserRepository::with_users([ada.clone()]));
        let ctx = context(repo, Some(&ada), &[("q", "rust"), ("admin", "1")], None);

        let permitted = ctx.permitted_params().await;
        assert_eq!(permitted.user(), Some(&ada));
        assert_eq!(permitted.permit(&["q"]).len(), 1);
    }

    #[tokio::test]
    async fn test_find_user() {
        let ada = user(None);
        let repo = Arc::new(InMemoryUserRepository::with_users([ada.clone()]));
        let ctx = context(repo.clone(), None, &[], None);

        assert_eq!(ctx.find_user("u1").await.unwrap(), Some(ada));

        repo.set_failing(true);
        assert!(ctx.find_user("u1").await.is_err());
    }
}
