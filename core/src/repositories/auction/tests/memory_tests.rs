//! Unit tests for the in-memory auction repository

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::{Auction, AuctionStatus};
use crate::errors::DomainError;
use crate::repositories::auction::{AuctionQuery, AuctionRepository, InMemoryAuctionRepository};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn auction(offset_days: i64, ends_in_days: i64, description: &str) -> Auction {
    let created = base_time() + Duration::days(offset_days);
    Auction {
        id: Uuid::new_v4(),
        reference: String::new(),
        auction_description: description.to_string(),
        item_description: "Assorted items".to_string(),
        categories: vec!["general".to_string()],
        requirements: vec!["Valid CAC".to_string()],
        image_url: None,
        starting_amount: Some(10_000),
        start_date: created,
        end_date: base_time() + Duration::days(ends_in_days),
        created_at: created,
        updated_at: created,
    }
}

#[tokio::test]
async fn test_references_are_sequential() {
    let repo = InMemoryAuctionRepository::new();
    let first = repo.create(auction(0, 5, "one")).await.unwrap();
    let second = repo.create(auction(1, 5, "two")).await.unwrap();
    assert_eq!(first.reference, "NGA-001");
    assert_eq!(second.reference, "NGA-002");
}

#[tokio::test]
async fn test_update_missing_auction() {
    let repo = InMemoryAuctionRepository::new();
    let result = repo.update(auction(0, 5, "ghost")).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_list_by_status_and_search() {
    let repo = InMemoryAuctionRepository::new();
    repo.create(auction(0, -1, "Closed fleet sale")).await.unwrap();
    repo.create(auction(1, 3, "Open fleet sale")).await.unwrap();
    repo.create(auction(2, 3, "Office furniture")).await.unwrap();

    let mut query = AuctionQuery::new(base_time());
    query.status = Some(AuctionStatus::Open);
    let open = repo.list(&query).await.unwrap();
    assert_eq!(open.meta.total, 2);
    assert_eq!(open.items[0].auction_description, "Office furniture");

    query.search = Some("FLEET".to_string());
    let open_fleet = repo.list(&query).await.unwrap();
    assert_eq!(open_fleet.meta.total, 1);

    let mut closed = AuctionQuery::new(base_time());
    closed.status = Some(AuctionStatus::Closed);
    assert_eq!(repo.list(&closed).await.unwrap().meta.total, 1);
}
