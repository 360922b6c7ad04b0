//! Auction repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use eb_shared::{PaginatedResponse, Pagination};

use crate::domain::entities::{Auction, AuctionStatus};
use crate::errors::DomainError;

/// Filter for auction listings
#[derive(Debug, Clone)]
pub struct AuctionQuery {
    /// Keep only auctions with this status at `now`
    pub status: Option<AuctionStatus>,
    /// The instant status is judged against
    pub now: DateTime<Utc>,
    /// Case-insensitive substring over descriptions and categories
    pub search: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub pagination: Pagination,
}

impl AuctionQuery {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            status: None,
            now,
            search: None,
            created_from: None,
            created_to: None,
            pagination: Pagination::default(),
        }
    }
}

/// Repository trait for Auction persistence operations
#[async_trait]
pub trait AuctionRepository: Send + Sync {
    /// Insert an auction, assigning the next sequential reference
    ///
    /// Whatever `auction.reference` holds on input is replaced.
    async fn create(&self, auction: Auction) -> Result<Auction, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Auction>, DomainError>;

    /// Overwrite an existing auction
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No auction with this id
    async fn update(&self, auction: Auction) -> Result<Auction, DomainError>;

    /// Matching auctions, newest first
    async fn list(&self, query: &AuctionQuery) -> Result<PaginatedResponse<Auction>, DomainError>;
}
