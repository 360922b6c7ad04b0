pub mod account;
pub mod auction;

pub use account::{AccountRepository, ClientQuery, InMemoryAccountRepository};
pub use auction::{AuctionQuery, AuctionRepository, InMemoryAuctionRepository};
