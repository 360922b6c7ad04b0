//! Auction listing entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest accepted opening amount
pub const MIN_STARTING_AMOUNT: u64 = 10_000;

/// Prefix of public auction references
pub const REFERENCE_PREFIX: &str = "NGA";

/// Computed from the end date, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionStatus {
    Open,
    Closed,
}

impl std::str::FromStr for AuctionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(AuctionStatus::Open),
            "closed" => Ok(AuctionStatus::Closed),
            other => Err(format!("unknown auction status: {other}")),
        }
    }
}

/// Formats the public reference for the `sequence`-th auction
///
/// `1` becomes `NGA-001`; numbers wider than three digits are kept intact.
pub fn format_reference(sequence: u64) -> String {
    format!("{}-{:03}", REFERENCE_PREFIX, sequence)
}

/// Auction entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    pub id: Uuid,

    /// Sequential public reference, e.g. `NGA-007`
    pub reference: String,

    pub auction_description: String,

    pub item_description: String,

    pub categories: Vec<String>,

    pub requirements: Vec<String>,

    /// Hosted image location
    pub image_url: Option<String>,

    /// Reserve price in naira, when one is set
    pub starting_amount: Option<u64>,

    pub start_date: DateTime<Utc>,

    pub end_date: DateTime<Utc>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Auction {
    /// Open while the end date lies in the future
    pub fn status(&self, now: DateTime<Utc>) -> AuctionStatus {
        if self.end_date > now {
            AuctionStatus::Open
        } else {
            AuctionStatus::Closed
        }
    }
}
