use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eb_core::domain::entities::AuctionStatus;
use eb_core::services::{AuctionDraft, AuctionView};

/// Auction create / update body; absent fields are left unchanged on update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuctionRequest {
    pub auction_description: Option<String>,
    pub item_description: Option<String>,
    #[serde(alias = "category")]
    pub categories: Option<Vec<String>>,
    #[serde(alias = "auctionRequirements")]
    pub requirements: Option<Vec<String>>,
    /// Hosted image location, uploaded beforehand
    #[serde(alias = "image")]
    pub image_url: Option<String>,
    pub starting_amount: Option<u64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl From<AuctionRequest> for AuctionDraft {
    fn from(request: AuctionRequest) -> Self {
        AuctionDraft {
            auction_description: request.auction_description,
            item_description: request.item_description,
            categories: request.categories,
            requirements: request.requirements,
            image_url: request.image_url,
            starting_amount: request.starting_amount,
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionResponse {
    pub id: Uuid,
    pub reference: String,
    pub auction_description: String,
    pub item_description: String,
    pub categories: Vec<String>,
    pub requirements: Vec<String>,
    pub image_url: Option<String>,
    pub starting_amount: Option<u64>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: AuctionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AuctionView> for AuctionResponse {
    fn from(view: AuctionView) -> Self {
        let auction = view.auction;
        Self {
            id: auction.id,
            reference: auction.reference,
            auction_description: auction.auction_description,
            item_description: auction.item_description,
            categories: auction.categories,
            requirements: auction.requirements,
            image_url: auction.image_url,
            starting_amount: auction.starting_amount,
            start_date: auction.start_date,
            end_date: auction.end_date,
            status: view.status,
            created_at: auction.created_at,
            updated_at: auction.updated_at,
        }
    }
}
