//! Database configuration module

use serde::{Deserialize, Serialize};

/// Database configuration for MySQL connections
///
/// When `url` is absent the server runs on the in-memory repositories,
/// which is how local development and the API tests run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,

    /// Apply `migrations/` on startup
    #[serde(default)]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
            run_migrations: false,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Whether a real database has been configured
    pub fn is_configured(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }

    /// Check if this is a production database
    pub fn is_production(&self) -> bool {
        match &self.url {
            Some(url) => !url.contains("localhost") && !url.contains("127.0.0.1"),
            None => false,
        }
    }
}
