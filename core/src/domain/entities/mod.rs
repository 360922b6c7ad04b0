//! Domain entities representing core business objects.

pub mod account;
pub mod auction;
pub mod pending_code;


pub use account::{
    Account, AccountProfile, AccountRole, AdminProfile, ApprovalState, ClientProfile, ContactInfo,
    VerificationState,
};
pub use auction::{format_reference, Auction, AuctionStatus, MIN_STARTING_AMOUNT};
pub use pending_code::{CodePurpose, PendingCode};
