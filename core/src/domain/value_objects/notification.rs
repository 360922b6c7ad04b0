//! Notification requests handed to the dispatch port.

use serde::{Deserialize, Serialize};

use crate::domain::entities::ContactInfo;

/// What happened to the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    VerificationCode,
    Welcome,
    ResetCode,
    ResetSuccess,
    Approved,
    Rejected,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::VerificationCode => "verification_code",
            NotificationKind::Welcome => "welcome",
            NotificationKind::ResetCode => "reset_code",
            NotificationKind::ResetSuccess => "reset_success",
            NotificationKind::Approved => "approved",
            NotificationKind::Rejected => "rejected",
        }
    }
}

/// A single outbound notification
///
/// `code` is set only for `VerificationCode` and `ResetCode`; it is the one
/// place a plaintext code exists outside the issuing call.
#[derive(Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub recipient: ContactInfo,
    pub code: Option<String>,
}

impl Notification {
    pub fn new(kind: NotificationKind, recipient: ContactInfo) -> Self {
        Self {
            kind,
            recipient,
            code: None,
        }
    }

    pub fn with_code(kind: NotificationKind, recipient: ContactInfo, code: String) -> Self {
        Self {
            kind,
            recipient,
            code: Some(code),
        }
    }

    pub fn address(&self) -> &str {
        &self.recipient.email
    }
}

impl std::fmt::Debug for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notification")
            .field("kind", &self.kind)
            .field("recipient", &self.recipient)
            .field("code", &self.code.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
