//! Plain-text mail templates

use eb_core::domain::value_objects::{Notification, NotificationKind};

use super::mailer::OutgoingMail;

const APP_NAME: &str = "E-Biding";

/// Render the subject and body for `notification`
pub fn render(notification: &Notification) -> OutgoingMail {
    let name = notification.recipient.name.as_str();
    let code = notification.code.as_deref().unwrap_or_default();

    let (subject, text) = match notification.kind {
        NotificationKind::VerificationCode => (
            "Email Verification".to_string(),
            format!(
                "Hello {name},\n\n\
                 Your account on {APP_NAME} has been created. To proceed, please verify \
                 your email address with this code:\n\n\
                 {code}\n\n\
                 If you did not create this account, please ignore this email."
            ),
        ),
        NotificationKind::Welcome => (
            format!("Welcome to {APP_NAME}"),
            format!(
                "Hello {name},\n\n\
                 Your email address has been verified. Our team will review your \
                 registration documents and let you know once your account is approved."
            ),
        ),
        NotificationKind::ResetCode => (
            "Password Reset".to_string(),
            format!(
                "Hello {name},\n\n\
                 Use this code to reset your {APP_NAME} password:\n\n\
                 {code}\n\n\
                 If you did not ask for a reset, you can ignore this email; your \
                 password stays unchanged."
            ),
        ),
        NotificationKind::ResetSuccess => (
            "Password Changed".to_string(),
            format!(
                "Hello {name},\n\n\
                 Your {APP_NAME} password was changed. If this was not you, contact \
                 our support team immediately."
            ),
        ),
        NotificationKind::Approved => (
            "Account Approved".to_string(),
            format!(
                "Hello {name},\n\n\
                 Your {APP_NAME} account has been approved. You can now take part in \
                 open auctions."
            ),
        ),
        NotificationKind::Rejected => (
            "Registration Declined".to_string(),
            format!(
                "Hello {name},\n\n\
                 We could not approve your {APP_NAME} registration and the account has \
                 been removed. You are welcome to register again with updated documents."
            ),
        ),
    };

    OutgoingMail {
        to_email: notification.recipient.email.clone(),
        to_name: notification.recipient.name.clone(),
        subject,
        text,
    }
}
