//! Transactional email configuration

use serde::{Deserialize, Serialize};

/// Which mailer backs the notification dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Log the message instead of sending it
    Log,
    /// Brevo-compatible HTTP transactional email API
    Http,
}

impl Default for MailProvider {
    fn default() -> Self {
        MailProvider::Log
    }
}

/// Transactional email configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    #[serde(default)]
    pub provider: MailProvider,

    /// Send endpoint of the HTTP provider
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Provider API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender address
    #[serde(default = "default_sender_email")]
    pub sender_email: String,

    /// Sender display name
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::default(),
            endpoint: default_endpoint(),
            api_key: None,
            sender_email: default_sender_email(),
            sender_name: default_sender_name(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl MailConfig {
    /// HTTP delivery needs an API key and a sender
    pub fn is_http_ready(&self) -> bool {
        self.provider == MailProvider::Http
            && self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
            && !self.sender_email.trim().is_empty()
    }
}

fn default_endpoint() -> String {
    String::from("https://api.brevo.com/v3/smtp/email")
}

fn default_sender_email() -> String {
    String::from("no-reply@e-biding.local")
}

fn default_sender_name() -> String {
    String::from("E-Biding")
}

fn default_timeout() -> u64 {
    10
}
