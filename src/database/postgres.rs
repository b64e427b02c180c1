//! PostgreSQL connection pool lifecycle
//!
//! The pool can be obtained two ways:
//! - [`pool`] - a process-wide handle, constructed lazily on the first
//!   retrieval call from environment configuration. Initialization happens
//!   exactly once even when first calls race; a failed initialization leaves
//!   no partial handle and the next call retries.
//! - [`init_pool`] - explicit construction from a [`PostgresConfig`], for
//!   applications that prefer to own the pool and inject it.

use secrecy::ExposeSecret;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::PostgresConfig;
use crate::error::{Error, Result};

/// PostgreSQL connection pool type alias
pub type PostgresPool = PgPool;

static POOL: OnceCell<PostgresPool> = OnceCell::const_new();

/// Get the shared process-wide connection pool, constructing it on first use.
///
/// Reads [`PostgresConfig::from_env`] the first time it is called; a missing
/// `DATABASE_URL` surfaces here as [`Error::Config`]. Concurrent first calls
/// all observe the same fully-initialized pool.
pub async fn pool() -> Result<&'static PostgresPool> {
    POOL.get_or_try_init(|| async {
        let config = PostgresConfig::from_env()?;
        init_pool(&config).await
    })
    .await
}

/// Initialize a PostgreSQL connection pool
pub async fn init_pool(config: &PostgresConfig) -> Result<PostgresPool> {
    info!("Initializing PostgreSQL connection pool");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(config.url.expose_secret())
        .await?;

    verify_database(&pool).await?;

    info!("PostgreSQL connection pool initialized successfully");
    Ok(pool)
}

/// Verify database connection and check for the pgvector extension
async fn verify_database(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;

    let result: Option<(String,)> =
        sqlx::query_as("SELECT extname FROM pg_extension WHERE extname = 'vector'")
            .fetch_optional(pool)
            .await?;

    if result.is_none() {
        return Err(Error::Retrieval(sqlx::Error::Configuration(
            "pgvector extension is not installed. Run: CREATE EXTENSION vector;".into(),
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    // Pool construction against a live database is exercised by the embedding
    // application's environment; without DATABASE_URL the lazy accessor must
    // fail with a configuration error and leave the cell empty for a retry.
    use super::*;
    use crate::config::test_env;

    #[tokio::test]
    async fn test_pool_without_config_is_config_error() {
        let _guard = test_env::lock();
        if std::env::var("DATABASE_URL").is_ok() {
            return;
        }
        let err = pool().await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        // No partial handle was created; a second call fails the same way.
        let err = pool().await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
