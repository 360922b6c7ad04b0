//! Value objects representing immutable domain concepts.

pub mod authenticated;
pub mod notification;

// Re-export commonly used types
pub use authenticated::AuthenticatedAccount;
pub use notification::{Notification, NotificationKind};
