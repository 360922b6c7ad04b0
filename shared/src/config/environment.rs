//! Deployment environment and log output settings

use serde::{Deserialize, Serialize};
use std::env;

/// Where the service runs; picks the defaults and the optional config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    /// `EB_ENV`, then `ENVIRONMENT`; anything unreadable means development
    pub fn from_env() -> Self {
        ["EB_ENV", "ENVIRONMENT"]
            .iter()
            .find_map(|key| env::var(key).ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Optional TOML overrides, read from the working directory
    pub fn config_file(&self) -> &'static str {
        match self {
            Environment::Development => "config.development.toml",
            Environment::Staging => "config.staging.toml",
            Environment::Production => "config.production.toml",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// tracing-subscriber settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Emit file and line of each event
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Development)
    }
}

impl LoggingConfig {
    /// Readable output with sources locally, JSON lines once deployed
    pub fn for_environment(env: Environment) -> Self {
        let deployed = env != Environment::Development;
        Self {
            level: if deployed {
                "info,sqlx=warn".to_string()
            } else {
                "debug,sqlx=info".to_string()
            },
            format: if deployed {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            },
            source_location: !deployed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}
