//! Auction listing management

mod service;
mod types;


pub use service::AuctionService;
pub use types::{AuctionDraft, AuctionFilter, AuctionView};
