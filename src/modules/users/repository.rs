//! User lookups used by the request pipeline.
//!
//! The pipeline only ever reads users: one lookup by id per request to
//! resolve the session, and the occasional lookup by username or uid from a
//! handler. [`UserRepository`] is the seam; [`PgUserRepository`] is the
//! PostgreSQL implementation used by the server.

use async_trait::async_trait;
use gatehouse_db::PgPool;
use gatehouse_models::{User, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("user {0} not found")]
    NotFound(UserId),

    #[error("user lookup failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

impl LookupError {
    /// Short label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            LookupError::NotFound(_) => "not_found",
            LookupError::Database(_) => "database",
            LookupError::Unavailable(_) => "unavailable",
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find(&self, id: UserId) -> Result<User, LookupError>;

    /// Looks a user up by username, falling back to uid.
    async fn find_by_username_or_uid(&self, key: &str) -> Result<Option<User>, LookupError>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const USER_COLUMNS: &str = "id, username, uid, locale, time_zone, banned, admin";

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find(&self, id: UserId) -> Result<User, LookupError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(LookupError::NotFound(id))
    }

    async fn find_by_username_or_uid(&self, key: &str) -> Result<Option<User>, LookupError> {
        // Username wins when one user's username equals another's uid.
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 OR uid = $1 \
             ORDER BY (username = $1) DESC LIMIT 1"
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(key)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }
}
