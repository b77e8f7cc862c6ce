//! # Gatehouse DB
//!
//! PostgreSQL pool initialization and schema migrations.
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&database_url).await?;
//! run_migrations(&pool).await?;
//! ```

use std::env;

use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;

/// Initializes a PostgreSQL connection pool.
///
/// The pool size is read from `DATABASE_MAX_CONNECTIONS` (default: 10). The
/// pipeline issues at most one identity lookup per request, so the pool is
/// sized for request concurrency rather than query fan-out.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Applies the migrations under the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
