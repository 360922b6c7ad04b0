//! Listener and CORS settings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// actix workers; 0 keeps the actix default (one per core)
    #[serde(default)]
    pub workers: usize,

    /// JSON body limit in bytes
    #[serde(default = "default_max_payload_size")]
    pub max_payload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            workers: 0,
            max_payload_size: default_max_payload_size(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Cross-origin access for the web frontends
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Needed for the session cookies to cross origins
    #[serde(default = "default_allow_credentials")]
    pub allow_credentials: bool,

    /// Preflight cache lifetime in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allow_credentials: default_allow_credentials(),
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Any origin; used locally and in tests
    pub fn development() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: true,
            max_age: 3600,
        }
    }

    /// Whether any origin is accepted
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn default_max_payload_size() -> usize {
    2 * 1024 * 1024 // 2 MB
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "https://e-biding-fe.vercel.app".to_string(),
    ]
}

fn default_allow_credentials() -> bool {
    true
}

fn default_max_age() -> usize {
    86400 // 24 hours
}
