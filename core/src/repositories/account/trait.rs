//! Account repository trait defining the persistence port of the lifecycle.
//!
//! Saves are compare-and-set on `Account::version`: a write only lands if
//! the stored version still equals the version the caller loaded. This is
//! what keeps two racing confirmations from both succeeding.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use eb_shared::{PaginatedResponse, Pagination};

use crate::domain::entities::Account;
use crate::errors::DomainError;

/// Filter for the admin client directory
#[derive(Debug, Clone, Default)]
pub struct ClientQuery {
    /// Case-insensitive substring over company and contact fields
    pub search: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub pagination: Pagination,
}

/// Repository trait for Account persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by email, compared case-insensitively
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by email or, for admins, by user name
    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, DomainError>;

    /// Insert a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::DuplicateField)` - A unique field is already taken
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Compare-and-set save
    ///
    /// `account.version` must equal the stored version. On success the
    /// stored copy carries `version + 1` and is returned.
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No account with this id
    /// * `Err(DomainError::ConcurrentModification)` - Stored version moved on
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Compare-and-set delete, same version rule as `update`
    async fn delete(&self, id: Uuid, expected_version: u64) -> Result<(), DomainError>;

    /// Verified client accounts, newest first
    async fn list_verified_clients(
        &self,
        query: &ClientQuery,
    ) -> Result<PaginatedResponse<Account>, DomainError>;
}
