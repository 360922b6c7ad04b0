//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Session token configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `lifecycle` - Verification / password reset code policy
//! - `mail` - Transactional email provider
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod lifecycle;
pub mod mail;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, BootstrapAdminConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use lifecycle::LifecycleConfig;
pub use mail::{MailConfig, MailProvider};
pub use server::{CorsConfig, ServerConfig};

/// Prefix for environment variable overrides, e.g. `EB__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "EB";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session configuration
    pub auth: AuthConfig,

    /// Verification and reset code policy
    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    /// Transactional email configuration
    #[serde(default)]
    pub mail: MailConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Baseline configuration for an environment, before file and env overrides
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self {
                environment,
                server: ServerConfig::new("0.0.0.0", 8080),
                database: DatabaseConfig::default().with_max_connections(50),
                auth: AuthConfig {
                    cookie_secure: true,
                    ..AuthConfig::default()
                },
                lifecycle: LifecycleConfig::default(),
                mail: MailConfig::default(),
                cors: CorsConfig::default(),
                logging: LoggingConfig::for_environment(environment),
            },
            _ => Self {
                environment,
                server: ServerConfig::default(),
                database: DatabaseConfig::default(),
                auth: AuthConfig::default(),
                lifecycle: LifecycleConfig::default(),
                mail: MailConfig::default(),
                cors: CorsConfig::development(),
                logging: LoggingConfig::for_environment(environment),
            },
        }
    }

    /// Load configuration for the environment named by `EB_ENV` or `ENVIRONMENT`
    ///
    /// Sources, later ones winning:
    /// 1. environment defaults
    /// 2. optional `config.<env>.toml` in the working directory
    /// 3. `EB__`-prefixed environment variables (`EB__LIFECYCLE__RESET_TTL_SECONDS`)
    /// 4. conventional variables (`DATABASE_URL`, `JWT_SECRET`, `PORT`)
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let defaults = Self::for_environment(environment);

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(
                config::File::new(environment.config_file(), config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let mut loaded: Self = settings.try_deserialize()?;
        loaded.apply_conventional_env();
        loaded.validate()?;
        Ok(loaded)
    }

    fn apply_conventional_env(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = Some(url);
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Reject configurations the services cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lifecycle.validate()?;

        if self.environment.is_production() && self.auth.is_using_default_secret() {
            return Err(ConfigError::Invalid {
                message: "JWT secret must be set in production".to_string(),
            });
        }

        if self.auth.session_ttl_seconds <= 0 {
            return Err(ConfigError::Invalid {
                message: "auth.session_ttl_seconds must be positive".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig::for_environment(Environment::Production);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));

        let mut config = config;
        config.auth.jwt_secret = "a-real-secret-from-the-vault".to_string();
        assert!(config.validate().is_ok());
        assert!(config.auth.cookie_secure);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = AppConfig::default();
        config.lifecycle.reset_ttl_seconds = 0;
        assert!(config.validate().is_err());
    }
}
