//! In-memory AuctionRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use eb_shared::PaginatedResponse;

use crate::domain::entities::{format_reference, Auction};
use crate::errors::DomainError;

use super::trait_::{AuctionQuery, AuctionRepository};

#[derive(Clone, Default)]
pub struct InMemoryAuctionRepository {
    auctions: Arc<RwLock<HashMap<Uuid, Auction>>>,
}

impl InMemoryAuctionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_search(auction: &Auction, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    auction.auction_description.to_lowercase().contains(&needle)
        || auction.item_description.to_lowercase().contains(&needle)
        || auction
            .categories
            .iter()
            .any(|c| c.to_lowercase().contains(&needle))
}

#[async_trait]
impl AuctionRepository for InMemoryAuctionRepository {
    async fn create(&self, auction: Auction) -> Result<Auction, DomainError> {
        let mut auctions = self.auctions.write().await;

        let mut stored = auction;
        stored.reference = format_reference(auctions.len() as u64 + 1);
        auctions.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Auction>, DomainError> {
        let auctions = self.auctions.read().await;
        Ok(auctions.get(&id).cloned())
    }

    async fn update(&self, auction: Auction) -> Result<Auction, DomainError> {
        let mut auctions = self.auctions.write().await;

        if !auctions.contains_key(&auction.id) {
            return Err(DomainError::not_found("Auction"));
        }

        auctions.insert(auction.id, auction.clone());
        Ok(auction)
    }

    async fn list(&self, query: &AuctionQuery) -> Result<PaginatedResponse<Auction>, DomainError> {
        let auctions = self.auctions.read().await;

        let mut matching: Vec<&Auction> = auctions
            .values()
            .filter(|a| query.status.map_or(true, |s| a.status(query.now) == s))
            .filter(|a| query.created_from.map_or(true, |from| a.created_at >= from))
            .filter(|a| query.created_to.map_or(true, |to| a.created_at <= to))
            .filter(|a| {
                query
                    .search
                    .as_deref()
                    .map_or(true, |needle| matches_search(a, needle))
            })
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(query.pagination.offset()).unwrap_or(usize::MAX))
            .take(query.pagination.limit as usize)
            .cloned()
            .collect();

        Ok(PaginatedResponse::new(items, query.pagination, total))
    }
}
