//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl Pagination {
    /// Create a new pagination, clamping out-of-range values
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(MIN_LIMIT, MAX_LIMIT),
        }
    }

    /// Build from optional query parameters; zero falls back to the default
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let limit = limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT);
        Self::new(page, limit)
    }

    /// Calculate the offset for queries
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Check if this is the first page
    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }

    /// Whether the requested page exists for `total` items
    ///
    /// The first page always exists, even when there is nothing to show.
    pub fn is_within(&self, total: u64) -> bool {
        self.is_first_page() || self.offset() < total
    }
}

/// Metadata describing one page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub per_page: u32,
    pub current_page: u32,
    pub last_page: u32,
    pub total: u64,
}

impl PageMeta {
    pub fn new(pagination: Pagination, total: u64) -> Self {
        let limit = u64::from(pagination.limit.max(1));
        let last_page = total.div_ceil(limit);
        Self {
            per_page: pagination.limit,
            current_page: pagination.page,
            last_page: u32::try_from(last_page).unwrap_or(u32::MAX),
            total,
        }
    }
}

/// One page of items plus its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(items: Vec<T>, pagination: Pagination, total: u64) -> Self {
        Self {
            items,
            meta: PageMeta::new(pagination, total),
        }
    }

    /// Transform the items using a function
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    /// Check if the page is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;
const MIN_LIMIT: u32 = 1;
const MAX_LIMIT: u32 = 100;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}
