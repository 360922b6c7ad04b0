//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and schema migrations
//! - Repository implementations for accounts and auctions

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlAccountRepository, MySqlAuctionRepository};
