//! Auction creation, editing and listing

use std::sync::Arc;
use uuid::Uuid;

use eb_shared::PaginatedResponse;

use crate::domain::entities::Auction;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AuctionQuery, AuctionRepository};
use crate::services::clock::{Clock, SystemClock};

use super::types::{AuctionDraft, AuctionFilter, AuctionView};

pub struct AuctionService<R: AuctionRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: AuctionRepository> AuctionService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Validate and store a new auction; the repository assigns its reference
    pub async fn create_auction(&self, draft: AuctionDraft) -> DomainResult<AuctionView> {
        let valid = draft.validate()?;
        let now = self.clock.now();

        let auction = Auction {
            id: Uuid::new_v4(),
            reference: String::new(),
            auction_description: valid.auction_description,
            item_description: valid.item_description,
            categories: valid.categories,
            requirements: valid.requirements,
            image_url: valid.image_url,
            starting_amount: valid.starting_amount,
            start_date: valid.start_date,
            end_date: valid.end_date,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(auction).await?;
        tracing::info!(
            auction_id = %created.id,
            reference = %created.reference,
            event = "auction_created",
            "Auction created"
        );
        Ok(AuctionView::at(created, now))
    }

    /// Apply `patch` and re-validate the merged auction
    pub async fn update_auction(&self, id: Uuid, patch: AuctionDraft) -> DomainResult<AuctionView> {
        let now = self.clock.now();
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Auction"))?;

        let valid = patch.merged_over(&existing).validate()?;
        let updated = Auction {
            auction_description: valid.auction_description,
            item_description: valid.item_description,
            categories: valid.categories,
            requirements: valid.requirements,
            image_url: valid.image_url,
            starting_amount: valid.starting_amount,
            start_date: valid.start_date,
            end_date: valid.end_date,
            updated_at: now,
            ..existing
        };

        let saved = self.repository.update(updated).await?;
        tracing::info!(
            auction_id = %saved.id,
            reference = %saved.reference,
            event = "auction_updated",
            "Auction updated"
        );
        Ok(AuctionView::at(saved, now))
    }

    /// Matching auctions with status judged against a single clock read
    pub async fn list_auctions(
        &self,
        filter: AuctionFilter,
    ) -> DomainResult<PaginatedResponse<AuctionView>> {
        if let (Some(from), Some(to)) = (filter.created_from, filter.created_to) {
            if from > to {
                return Err(DomainError::validation("start date must not be after end date"));
            }
        }

        let now = self.clock.now();
        let query = AuctionQuery {
            status: filter.status,
            now,
            search: filter.search,
            created_from: filter.created_from,
            created_to: filter.created_to,
            pagination: filter.pagination,
        };

        let page = self.repository.list(&query).await?;
        if !query.pagination.is_within(page.meta.total) {
            return Err(DomainError::validation("This page does not exist"));
        }
        Ok(page.map(|auction| AuctionView::at(auction, now)))
    }
}
