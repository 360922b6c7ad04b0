//! API response envelope
//!
//! Every successful endpoint answers with
//! `{ "status": "Success", "message": ..., "data": ..., "meta": ... }`.

use serde::{Deserialize, Serialize};

use super::pagination::{PageMeta, PaginatedResponse};

/// Outcome marker carried in the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,

    pub message: String,

    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Pagination metadata for list endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response carrying data
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data: Some(data),
            meta: None,
        }
    }

    /// Create a successful list response from a page of results
    pub fn page(message: impl Into<String>, page: PaginatedResponse<T>) -> ApiResponse<Vec<T>> {
        ApiResponse {
            status: ResponseStatus::Success,
            message: message.into(),
            data: Some(page.items),
            meta: Some(page.meta),
        }
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

impl ApiResponse<()> {
    /// Create a successful response without a payload
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data: None,
            meta: None,
        }
    }
}
