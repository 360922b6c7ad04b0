//! Mail transport trait

use async_trait::async_trait;
use tracing::info;

use eb_shared::mask_email;

use crate::InfrastructureError;

/// A rendered message ready for delivery
#[derive(Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub text: String,
}

impl std::fmt::Debug for OutgoingMail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Bodies may carry one-time codes.
        f.debug_struct("OutgoingMail")
            .field("to_email", &mask_email(&self.to_email))
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

/// Transactional email transport
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message
    async fn send(&self, mail: &OutgoingMail) -> Result<(), InfrastructureError>;

    /// Short provider name used in logs
    fn provider_name(&self) -> &'static str;
}

/// Logs each message instead of sending it
///
/// Only the masked recipient and subject are logged, never the body.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), InfrastructureError> {
        info!(
            to = %mask_email(&mail.to_email),
            subject = %mail.subject,
            "Mail delivery skipped (log provider)"
        );
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "log"
    }
}
