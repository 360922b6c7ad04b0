//! Session token configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// Session token (JWT) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret key for signing session tokens
    pub jwt_secret: String,

    /// Session lifetime in seconds (7 days)
    pub session_ttl_seconds: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// Mark session cookies `Secure`
    #[serde(default)]
    pub cookie_secure: bool,

    /// Admin account seeded at startup when absent
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from(DEFAULT_SECRET),
            session_ttl_seconds: 604_800,
            issuer: String::from("e-biding"),
            cookie_secure: false,
            bootstrap_admin: None,
        }
    }
}

impl AuthConfig {
    /// Create a new configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_SECRET
    }
}

/// First administrator, created on startup if the user name is free
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BootstrapAdminConfig {
    pub user_name: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_first_name")]
    pub first_name: String,
    #[serde(default = "default_last_name")]
    pub last_name: String,
}

fn default_first_name() -> String {
    String::from("Platform")
}

fn default_last_name() -> String {
    String::from("Administrator")
}
