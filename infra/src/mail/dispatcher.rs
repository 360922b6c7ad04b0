//! NotificationDispatcher that delivers by mail

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{error, warn};

use eb_core::domain::value_objects::Notification;
use eb_core::services::NotificationDispatcher;
use eb_shared::mask_email;

use super::mailer::Mailer;
use super::templates::render;

/// Renders each notification and sends it on a background task
///
/// Delivery failures are logged with `event = "notification_failed"` and
/// never reach the caller; the account change that triggered the
/// notification is already committed.
#[derive(Clone)]
pub struct MailDispatcher {
    mailer: Arc<dyn Mailer>,
}

impl MailDispatcher {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }
}

impl NotificationDispatcher for MailDispatcher {
    fn send(&self, notification: Notification) {
        let kind = notification.kind.as_str();
        let mail = render(&notification);

        let Ok(handle) = Handle::try_current() else {
            warn!(
                event = "notification_failed",
                kind,
                to = %mask_email(&mail.to_email),
                "No async runtime available, notification dropped"
            );
            return;
        };

        let mailer = Arc::clone(&self.mailer);
        handle.spawn(async move {
            if let Err(e) = mailer.send(&mail).await {
                error!(
                    event = "notification_failed",
                    kind,
                    provider = mailer.provider_name(),
                    to = %mask_email(&mail.to_email),
                    error = %e,
                    "Notification delivery failed"
                );
            }
        });
    }
}
