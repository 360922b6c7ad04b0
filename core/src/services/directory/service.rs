//! Read-only views over registered clients

use std::sync::Arc;
use uuid::Uuid;

use eb_shared::PaginatedResponse;

use crate::domain::entities::Account;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccountRepository, ClientQuery};

/// Client directory used by the admin console
pub struct ClientDirectory<R: AccountRepository> {
    repository: Arc<R>,
}

impl<R: AccountRepository> ClientDirectory<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Verified clients matching `query`, newest first
    ///
    /// Asking for a page past the last one is a validation error; the first
    /// page of an empty directory is not.
    pub async fn list_clients(&self, query: ClientQuery) -> DomainResult<PaginatedResponse<Account>> {
        if let (Some(from), Some(to)) = (query.created_from, query.created_to) {
            if from > to {
                return Err(DomainError::validation("start date must not be after end date"));
            }
        }

        let page = self.repository.list_verified_clients(&query).await?;
        if !query.pagination.is_within(page.meta.total) {
            return Err(DomainError::validation("This page does not exist"));
        }

        tracing::debug!(
            page = query.pagination.page,
            returned = page.items.len(),
            total = page.meta.total,
            "Listed clients"
        );
        Ok(page)
    }

    /// A single client by id; admin ids are not clients
    pub async fn get_client(&self, id: Uuid) -> DomainResult<Account> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|account| !account.is_admin())
            .ok_or_else(|| DomainError::not_found("Client"))
    }
}
