//! Database session management.

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tesoro_config::DatabaseConfig;
use tesoro_core::{Interface, TesoroError, TesoroResult};
use tracing::{info, warn};

/// Storage-backend handle injected into repositories.
///
/// The embedding application owns the session's lifecycle; repositories
/// hold a shared reference and never construct or close it themselves.
#[async_trait]
pub trait Session: Interface {
    /// Returns the underlying MySQL pool.
    fn pool(&self) -> &MySqlPool;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> TesoroResult<()>;

    /// Runs database migrations.
    async fn run_migrations(&self) -> TesoroResult<()>;

    /// Closes the session's pool.
    async fn close(&self);
}

/// SQLx-backed session over a MySQL connection pool.
pub struct SqlSession {
    pool: MySqlPool,
}

impl SqlSession {
    /// Opens a new session from configuration.
    pub async fn connect(config: &DatabaseConfig) -> TesoroResult<Self> {
        info!("Connecting to MySQL database...");

        let pool = MySqlPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                TesoroError::Database(format!("Failed to connect: {}", e))
            })?;

        info!("MySQL connection pool established");
        Ok(Self { pool })
    }

    /// Wraps a pre-existing pool (e.g. one built by the test harness).
    #[must_use]
    pub fn with_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn inner(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl Session for SqlSession {
    fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    async fn health_check(&self) -> TesoroResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| TesoroError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn run_migrations(&self) -> TesoroResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| TesoroError::Database(format!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::ops::Deref for SqlSession {
    type Target = MySqlPool;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}

impl std::fmt::Debug for SqlSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlSession")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}
