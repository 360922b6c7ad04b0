use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use eb_core::domain::entities::AuctionStatus;
use eb_core::errors::DomainError;
use eb_core::repositories::ClientQuery;
use eb_core::services::AuctionFilter;
use eb_shared::Pagination;

/// Query string of the list endpoints
///
/// `startDate` / `endDate` bound the creation date and accept either an
/// RFC 3339 timestamp or a plain `YYYY-MM-DD` day (inclusive).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// `open` or `closed`; auctions only
    pub status: Option<String>,
}

impl ListQuery {
    fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.limit)
    }

    fn search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn created_range(&self) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), DomainError> {
        let from = self
            .start_date
            .as_deref()
            .map(|raw| parse_date_bound(raw, false))
            .transpose()?;
        let to = self
            .end_date
            .as_deref()
            .map(|raw| parse_date_bound(raw, true))
            .transpose()?;
        Ok((from, to))
    }

    pub fn to_client_query(&self) -> Result<ClientQuery, DomainError> {
        let (created_from, created_to) = self.created_range()?;
        Ok(ClientQuery {
            search: self.search(),
            created_from,
            created_to,
            pagination: self.pagination(),
        })
    }

    pub fn to_auction_filter(&self) -> Result<AuctionFilter, DomainError> {
        let (created_from, created_to) = self.created_range()?;
        let status = self
            .status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().parse::<AuctionStatus>())
            .transpose()
            .map_err(DomainError::validation)?;

        Ok(AuctionFilter {
            status,
            search: self.search(),
            created_from,
            created_to,
            pagination: self.pagination(),
        })
    }
}

/// A timestamp, or a whole day widened to its first / last instant
pub fn parse_date_bound(raw: &str, end_of_day: bool) -> Result<DateTime<Utc>, DomainError> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }

    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DomainError::validation(format!("Invalid date: {}", raw)))?;
    let time = if end_of_day {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    }
    .ok_or_else(|| DomainError::validation(format!("Invalid date: {}", raw)))?;

    Ok(day.and_time(time).and_utc())
}
