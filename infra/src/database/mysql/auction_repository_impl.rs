//! MySQL implementation of the AuctionRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use eb_core::domain::entities::{format_reference, Auction, AuctionStatus};
use eb_core::errors::DomainError;
use eb_core::repositories::{AuctionQuery, AuctionRepository};
use eb_shared::PaginatedResponse;

use super::{column, internal, like_pattern, violated_unique_key};

const AUCTION_COLUMNS: &str = r#"
    id, reference, auction_description, item_description, categories,
    requirements, image_url, starting_amount, start_date, end_date,
    created_at, updated_at
"#;

/// MySQL implementation of AuctionRepository
#[derive(Clone)]
pub struct MySqlAuctionRepository {
    pool: MySqlPool,
}

fn encode_list(values: &[String]) -> Result<String, DomainError> {
    serde_json::to_string(values).map_err(|e| internal("Failed to encode list", e))
}

fn decode_list(raw: &str) -> Result<Vec<String>, DomainError> {
    serde_json::from_str(raw).map_err(|e| internal("Failed to decode list", e))
}

impl MySqlAuctionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_auction(row: &MySqlRow) -> Result<Auction, DomainError> {
        let id: String = column(row, "id")?;
        let categories: String = column(row, "categories")?;
        let requirements: String = column(row, "requirements")?;

        Ok(Auction {
            id: Uuid::parse_str(&id).map_err(|e| internal("Invalid auction UUID", e))?,
            reference: column(row, "reference")?,
            auction_description: column(row, "auction_description")?,
            item_description: column(row, "item_description")?,
            categories: decode_list(&categories)?,
            requirements: decode_list(&requirements)?,
            image_url: column(row, "image_url")?,
            starting_amount: column(row, "starting_amount")?,
            start_date: column(row, "start_date")?,
            end_date: column(row, "end_date")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

fn push_auction_filters(builder: &mut QueryBuilder<'_, MySql>, query: &AuctionQuery) {
    builder.push(" WHERE 1 = 1");

    match query.status {
        Some(AuctionStatus::Open) => {
            builder.push(" AND end_date > ").push_bind(query.now);
        }
        Some(AuctionStatus::Closed) => {
            builder.push(" AND end_date <= ").push_bind(query.now);
        }
        None => {}
    }
    if let Some(from) = query.created_from {
        builder.push(" AND created_at >= ").push_bind(from);
    }
    if let Some(to) = query.created_to {
        builder.push(" AND created_at <= ").push_bind(to);
    }
    if let Some(needle) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = like_pattern(needle);
        builder.push(" AND (");
        let mut separated = builder.separated(" OR ");
        for name in ["auction_description", "item_description", "categories"] {
            separated
                .push(format!("{} LIKE ", name))
                .push_bind_unseparated(pattern.clone());
        }
        builder.push(")");
    }
}

#[async_trait]
impl AuctionRepository for MySqlAuctionRepository {
    async fn create(&self, auction: Auction) -> Result<Auction, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| internal("Failed to begin transaction", e))?;

        // Locks the table range so two creators cannot read the same count.
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM auctions FOR UPDATE")
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| internal("Failed to count auctions", e))?;

        let mut stored = auction;
        stored.reference = format_reference(u64::try_from(count).unwrap_or(0) + 1);

        let query = format!(
            "INSERT INTO auctions ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            AUCTION_COLUMNS
        );
        sqlx::query(&query)
            .bind(stored.id.to_string())
            .bind(&stored.reference)
            .bind(&stored.auction_description)
            .bind(&stored.item_description)
            .bind(encode_list(&stored.categories)?)
            .bind(encode_list(&stored.requirements)?)
            .bind(&stored.image_url)
            .bind(stored.starting_amount)
            .bind(stored.start_date)
            .bind(stored.end_date)
            .bind(stored.created_at)
            .bind(stored.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| match violated_unique_key(&e) {
                Some(_) => DomainError::ConcurrentModification,
                None => internal("Failed to save auction", e),
            })?;

        tx.commit()
            .await
            .map_err(|e| internal("Failed to commit auction", e))?;

        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Auction>, DomainError> {
        let query = format!("SELECT {} FROM auctions WHERE id = ? LIMIT 1", AUCTION_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find auction", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_auction(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, auction: Auction) -> Result<Auction, DomainError> {
        let query = r#"
            UPDATE auctions SET
                auction_description = ?, item_description = ?, categories = ?,
                requirements = ?, image_url = ?, starting_amount = ?,
                start_date = ?, end_date = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&auction.auction_description)
            .bind(&auction.item_description)
            .bind(encode_list(&auction.categories)?)
            .bind(encode_list(&auction.requirements)?)
            .bind(&auction.image_url)
            .bind(auction.starting_amount)
            .bind(auction.start_date)
            .bind(auction.end_date)
            .bind(auction.updated_at)
            .bind(auction.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to update auction", e))?;

        // MySQL counts changed rows, so an identical rewrite also reports 0.
        if result.rows_affected() == 0 && self.find_by_id(auction.id).await?.is_none() {
            return Err(DomainError::not_found("Auction"));
        }

        Ok(auction)
    }

    async fn list(&self, query: &AuctionQuery) -> Result<PaginatedResponse<Auction>, DomainError> {
        let mut count = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM auctions");
        push_auction_filters(&mut count, query);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to count auctions", e))?;

        let mut select =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM auctions", AUCTION_COLUMNS));
        push_auction_filters(&mut select, query);
        select
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(u64::from(query.pagination.limit))
            .push(" OFFSET ")
            .push_bind(query.pagination.offset());

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| internal("Failed to list auctions", e))?;

        let mut auctions = Vec::with_capacity(rows.len());
        for row in rows {
            auctions.push(Self::row_to_auction(&row)?);
        }

        Ok(PaginatedResponse::new(
            auctions,
            query.pagination,
            u64::try_from(total).unwrap_or(0),
        ))
    }
}
