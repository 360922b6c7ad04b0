//! MySQL connection pool bootstrap

use std::fmt;
use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use eb_shared::config::DatabaseConfig;

use crate::InfrastructureError;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Snapshot of pool usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatistics {
    pub connections: u32,
    pub idle_connections: u32,
    pub max_connections: u32,
}

impl fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}

/// Shared MySQL pool handed to every repository
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    max_connections: u32,
}

impl DatabasePool {
    /// Connect using `config`
    ///
    /// # Returns
    /// * `Err(InfrastructureError::Config)` - No URL configured
    /// * `Err(InfrastructureError::Database)` - The server could not be reached
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let url = config
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| InfrastructureError::Config("database url is not set".to_string()))?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .connect(url)
            .await?;

        info!(
            max_connections = config.max_connections,
            "MySQL connection pool established"
        );

        Ok(Self {
            pool,
            max_connections: config.max_connections,
        })
    }

    /// Apply pending migrations from `migrations/`
    pub async fn migrate(&self) -> Result<(), InfrastructureError> {
        MIGRATOR.run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Round-trip a trivial query
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let value: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(value == 1)
    }

    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: u32::try_from(self.pool.num_idle()).unwrap_or(u32::MAX),
            max_connections: self.max_connections,
        }
    }

    pub fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
