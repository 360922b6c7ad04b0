//! Mail module - notification rendering and delivery
//!
//! - **Mailer**: transport trait with an HTTP (Brevo-compatible) and a
//!   logging implementation
//! - **Templates**: subject and plain-text body per notification kind
//! - **MailDispatcher**: the core `NotificationDispatcher` over a `Mailer`

pub mod dispatcher;
pub mod http_mailer;
pub mod mailer;
pub mod templates;

pub use dispatcher::MailDispatcher;
pub use http_mailer::HttpMailer;
pub use mailer::{LogMailer, Mailer, OutgoingMail};
pub use templates::render;

use std::sync::Arc;

use eb_shared::config::{MailConfig, MailProvider};

use crate::InfrastructureError;


/// Create a mailer based on configuration
///
/// `provider = "http"` without an API key or sender is a configuration
/// error rather than a silent fallback.
pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, InfrastructureError> {
    match config.provider {
        MailProvider::Log => Ok(Arc::new(LogMailer::new())),
        MailProvider::Http => {
            if !config.is_http_ready() {
                return Err(InfrastructureError::Config(
                    "mail provider 'http' needs an api_key and sender_email".to_string(),
                ));
            }
            Ok(Arc::new(HttpMailer::new(config)?))
        }
    }
}
