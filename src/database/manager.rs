use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("DATABASE_URL is not configured")]
    ConfigMissing,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Shared handle to the process-wide connection pool.
///
/// The pool is created lazily on first use and cached for the lifetime of
/// the process. The handle is cheap to clone and is injected into handlers
/// through application state rather than accessed as a global.
#[derive(Clone)]
pub struct Database {
    inner: Arc<Inner>,
}

struct Inner {
    url: Option<String>,
    max_connections: u32,
    acquire_timeout: Duration,
    pool: OnceCell<PgPool>,
}

impl Database {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                url: config.url.clone(),
                max_connections: config.max_connections,
                acquire_timeout: Duration::from_secs(config.acquire_timeout_secs),
                pool: OnceCell::new(),
            }),
        }
    }

    /// Get the pool, creating it on first use
    pub async fn pool(&self) -> Result<PgPool, DatabaseError> {
        let pool = self
            .inner
            .pool
            .get_or_try_init(|| async {
                let url = self
                    .inner
                    .url
                    .as_deref()
                    .ok_or(DatabaseError::ConfigMissing)?;

                let pool = PgPoolOptions::new()
                    .max_connections(self.inner.max_connections)
                    .acquire_timeout(self.inner.acquire_timeout)
                    .connect(url)
                    .await?;

                info!(
                    "Created database pool (max_connections={})",
                    self.inner.max_connections
                );
                Ok::<_, DatabaseError>(pool)
            })
            .await?;

        Ok(pool.clone())
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        let pool = self.pool().await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        let pool = self.pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(&self) {
        if let Some(pool) = self.inner.pool.get() {
            pool.close().await;
            info!("Closed database pool");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_database_reports_missing_config() {
        let db = Database::new(&DatabaseConfig {
            url: None,
            max_connections: 5,
            acquire_timeout_secs: 1,
        });
        assert!(matches!(
            db.pool().await,
            Err(DatabaseError::ConfigMissing)
        ));
    }
}
