use std::env;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use gatehouse_config::{AppConfig, SecurityHeadersConfig, SessionConfig, TimeZoneConfig};
use gatehouse_db::{init_db_pool, run_migrations};

use crate::i18n::Catalog;
use crate::middleware::gate::{AccessGate, CheckAdmin};
use crate::middleware::locale::{AcceptLanguage, LanguageMatcher, LocaleNegotiator};
use crate::modules::users::{PgUserRepository, UserRepository};

/// Process-wide state shared by every request. Read-only once built.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub negotiator: Arc<LocaleNegotiator>,
    pub gate: Arc<AccessGate>,
    pub admin_check: Arc<CheckAdmin>,
    pub session_config: SessionConfig,
    pub time_zone_config: TimeZoneConfig,
    pub security_config: SecurityHeadersConfig,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>, config: AppConfig) -> Self {
        Self::with_matcher(users, config, Arc::new(AcceptLanguage))
    }

    pub fn with_matcher(
        users: Arc<dyn UserRepository>,
        config: AppConfig,
        matcher: Arc<dyn LanguageMatcher>,
    ) -> Self {
        let catalog = Arc::new(Catalog::builtin(config.locale.default_locale.clone()));
        let gate = Arc::new(AccessGate::standard(&config.routes, catalog.clone()));
        let admin_check = Arc::new(CheckAdmin::new(&config.routes, catalog.clone()));

        Self {
            users,
            negotiator: Arc::new(LocaleNegotiator::new(config.locale, matcher)),
            gate,
            admin_check,
            session_config: config.session,
            time_zone_config: config.time_zone,
            security_config: config.security,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.session_config.key.clone()
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env().context("invalid configuration")?;

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    Ok(AppState::new(
        Arc::new(PgUserRepository::new(pool)),
        config,
    ))
}
