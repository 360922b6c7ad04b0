//! In-memory AccountRepository, used by tests and database-less runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use eb_shared::utils::validation::normalize_email;
use eb_shared::PaginatedResponse;

use crate::domain::entities::{Account, AccountProfile};
use crate::errors::DomainError;

use super::trait_::{AccountRepository, ClientQuery};

/// Account repository backed by a `HashMap`
///
/// Every operation holds the map lock for its whole read-check-write, which
/// gives the same per-record guarantee as a conditional `UPDATE`.
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    fn duplicate_field(
        accounts: &HashMap<Uuid, Account>,
        candidate: &Account,
    ) -> Option<&'static str> {
        let wanted = candidate.unique_fields();
        accounts
            .values()
            .filter(|existing| existing.id != candidate.id)
            .find_map(|existing| {
                let taken = existing.unique_fields();
                wanted
                    .iter()
                    .find(|field| taken.contains(field))
                    .map(|(name, _)| *name)
            })
    }
}

fn matches_search(account: &Account, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    let mut haystack = vec![account.email.as_str(), account.display_name.as_str()];
    if let AccountProfile::Client(profile) = &account.profile {
        haystack.extend([
            profile.company_name.as_str(),
            profile.company_address.as_str(),
            profile.phone_number.as_str(),
            profile.alternate_phone_number.as_str(),
            profile.rc_number.as_str(),
        ]);
    }
    haystack
        .iter()
        .any(|value| value.to_lowercase().contains(&needle))
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let email = normalize_email(email);
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, DomainError> {
        let login = login.trim().to_lowercase();
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| {
                a.email == login
                    || a
                        .admin_profile()
                        .is_some_and(|p| p.user_name.to_lowercase() == login)
            })
            .cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if let Some(field) = Self::duplicate_field(&accounts, &account) {
            return Err(DomainError::DuplicateField {
                field: field.to_string(),
            });
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        let stored_version = accounts
            .get(&account.id)
            .map(|stored| stored.version)
            .ok_or_else(|| DomainError::not_found("Account"))?;
        if stored_version != account.version {
            return Err(DomainError::ConcurrentModification);
        }
        if let Some(field) = Self::duplicate_field(&accounts, &account) {
            return Err(DomainError::DuplicateField {
                field: field.to_string(),
            });
        }

        let mut saved = account;
        saved.version += 1;
        accounts.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn delete(&self, id: Uuid, expected_version: u64) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;

        match accounts.get(&id) {
            None => Err(DomainError::not_found("Account")),
            Some(stored) if stored.version != expected_version => {
                Err(DomainError::ConcurrentModification)
            }
            Some(_) => {
                accounts.remove(&id);
                Ok(())
            }
        }
    }

    async fn list_verified_clients(
        &self,
        query: &ClientQuery,
    ) -> Result<PaginatedResponse<Account>, DomainError> {
        let accounts = self.accounts.read().await;

        let mut matching: Vec<&Account> = accounts
            .values()
            .filter(|a| !a.is_admin() && a.is_verified())
            .filter(|a| query.created_from.map_or(true, |from| a.created_at >= from))
            .filter(|a| query.created_to.map_or(true, |to| a.created_at <= to))
            .filter(|a| {
                query
                    .search
                    .as_deref()
                    .map_or(true, |needle| matches_search(a, needle))
            })
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(query.pagination.offset()).unwrap_or(usize::MAX))
            .take(query.pagination.limit as usize)
            .cloned()
            .collect();

        Ok(PaginatedResponse::new(items, query.pagination, total))
    }
}
