//! Notification dispatch port

use std::sync::{Arc, Mutex};

use crate::domain::value_objects::{Notification, NotificationKind};

/// Fire-and-forget delivery of account notifications
///
/// Implementations must not block and must not report failure back to the
/// caller; a state change stays committed whatever happens to delivery.
pub trait NotificationDispatcher: Send + Sync {
    fn send(&self, notification: Notification);
}

/// Keeps every notification in memory
///
/// Used by tests and by local runs without a mail provider.
#[derive(Debug, Clone, Default)]
pub struct RecordingDispatcher {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.lock().iter().map(|n| n.kind).collect()
    }

    /// Most recent code sent to `address`
    pub fn last_code_for(&self, address: &str) -> Option<String> {
        self.lock()
            .iter()
            .rev()
            .filter(|n| n.address() == address)
            .find_map(|n| n.code.clone())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.sent.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn send(&self, notification: Notification) {
        self.lock().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ContactInfo;

    fn contact(email: &str) -> ContactInfo {
        ContactInfo {
            email: email.to_string(),
            name: "Ada".to_string(),
        }
    }

    #[test]
    fn test_last_code_for_address() {
        let dispatcher = RecordingDispatcher::new();
        dispatcher.send(Notification::with_code(
            NotificationKind::VerificationCode,
            contact("a@x.io"),
            "111111".to_string(),
        ));
        dispatcher.send(Notification::with_code(
            NotificationKind::ResetCode,
            contact("a@x.io"),
            "222222".to_string(),
        ));
        dispatcher.send(Notification::new(NotificationKind::Welcome, contact("a@x.io")));
        dispatcher.send(Notification::with_code(
            NotificationKind::VerificationCode,
            contact("b@x.io"),
            "333333".to_string(),
        ));

        assert_eq!(dispatcher.last_code_for("a@x.io").as_deref(), Some("222222"));
        assert_eq!(dispatcher.last_code_for("c@x.io"), None);
        assert_eq!(dispatcher.kinds().len(), 4);
    }

    #[test]
    fn test_debug_redacts_code() {
        let notification = Notification::with_code(
            NotificationKind::VerificationCode,
            contact("a@x.io"),
            "654321".to_string(),
        );
        assert!(!format!("{notification:?}").contains("654321"));
    }
}
