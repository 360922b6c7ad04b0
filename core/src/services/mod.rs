//! Business services containing domain logic and use cases.

pub mod auction;
pub mod clock;
pub mod codes;
pub mod directory;
pub mod lifecycle;
pub mod notification;

// Re-export commonly used types
pub use auction::{AuctionDraft, AuctionFilter, AuctionService, AuctionView};
pub use clock::{Clock, ManualClock, SystemClock};
pub use codes::{
    BcryptCredentialHasher, CodeGenerator, ExpiryPolicy, IssueWindow, NumericCodeGenerator,
    SaltedCodeHasher, SecretHasher,
};
pub use directory::ClientDirectory;
pub use lifecycle::{IssuedCode, LifecycleService, LifecycleServiceConfig, NewAdmin, NewClient};
pub use notification::{NotificationDispatcher, RecordingDispatcher};
