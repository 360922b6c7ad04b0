//! Auction inputs and outputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eb_shared::Pagination;

use crate::domain::entities::{Auction, AuctionStatus, MIN_STARTING_AMOUNT};
use crate::errors::{DomainError, DomainResult};

/// Auction fields as submitted; `None` means "not given"
///
/// Used as-is for creation and as a patch for updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuctionDraft {
    pub auction_description: Option<String>,
    pub item_description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub requirements: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub starting_amount: Option<u64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// A draft that passed validation
#[derive(Debug, Clone)]
pub(super) struct ValidAuction {
    pub auction_description: String,
    pub item_description: String,
    pub categories: Vec<String>,
    pub requirements: Vec<String>,
    pub image_url: Option<String>,
    pub starting_amount: Option<u64>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl AuctionDraft {
    /// Fill every field the patch leaves out from `existing`
    pub fn merged_over(self, existing: &Auction) -> AuctionDraft {
        AuctionDraft {
            auction_description: self
                .auction_description
                .or_else(|| Some(existing.auction_description.clone())),
            item_description: self
                .item_description
                .or_else(|| Some(existing.item_description.clone())),
            categories: self.categories.or_else(|| Some(existing.categories.clone())),
            requirements: self
                .requirements
                .or_else(|| Some(existing.requirements.clone())),
            image_url: self.image_url.or_else(|| existing.image_url.clone()),
            starting_amount: self.starting_amount.or(existing.starting_amount),
            start_date: self.start_date.or(Some(existing.start_date)),
            end_date: self.end_date.or(Some(existing.end_date)),
        }
    }

    pub(super) fn validate(self) -> DomainResult<ValidAuction> {
        let auction_description = non_blank(self.auction_description);
        let item_description = non_blank(self.item_description);
        let categories = non_empty_list(self.categories);
        let requirements = non_empty_list(self.requirements);

        let mut missing = Vec::new();
        if auction_description.is_none() {
            missing.push("auction_description");
        }
        if item_description.is_none() {
            missing.push("item_description");
        }
        if categories.is_none() {
            missing.push("categories");
        }
        if requirements.is_none() {
            missing.push("requirements");
        }
        if self.start_date.is_none() {
            missing.push("start_date");
        }
        if self.end_date.is_none() {
            missing.push("end_date");
        }

        let (
            Some(auction_description),
            Some(item_description),
            Some(categories),
            Some(requirements),
            Some(start_date),
            Some(end_date),
        ) = (
            auction_description,
            item_description,
            categories,
            requirements,
            self.start_date,
            self.end_date,
        )
        else {
            return Err(DomainError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        };

        // Optional, but bounded once given
        if let Some(amount) = self.starting_amount.filter(|a| *a < MIN_STARTING_AMOUNT) {
            return Err(DomainError::validation(format!(
                "starting amount {} is not valid, it cannot be less than {}",
                amount, MIN_STARTING_AMOUNT
            )));
        }
        if end_date <= start_date {
            return Err(DomainError::validation("end date must be after start date"));
        }

        Ok(ValidAuction {
            auction_description,
            item_description,
            categories,
            requirements,
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
            starting_amount: self.starting_amount,
            start_date,
            end_date,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_empty_list(values: Option<Vec<String>>) -> Option<Vec<String>> {
    values
        .map(|list| {
            list.into_iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|list| !list.is_empty())
}

/// Listing filter
#[derive(Debug, Clone, Default)]
pub struct AuctionFilter {
    pub status: Option<AuctionStatus>,
    pub search: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub pagination: Pagination,
}

/// Auction plus its status at the time it was read
#[derive(Debug, Clone, Serialize)]
pub struct AuctionView {
    #[serde(flatten)]
    pub auction: Auction,
    pub status: AuctionStatus,
}

impl AuctionView {
    pub fn at(auction: Auction, now: DateTime<Utc>) -> Self {
        let status = auction.status(now);
        Self { auction, status }
    }
}
