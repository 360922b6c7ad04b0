//! Account creation: client sign-up and administrator provisioning

use eb_shared::mask_email;

use crate::domain::entities::{Account, AdminProfile, ClientProfile, CodePurpose};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::AccountRepository;

use super::service::LifecycleService;
use super::types::{NewAdmin, NewClient};

impl<R: AccountRepository> LifecycleService<R> {
    /// Register a client company and send its first verification code
    ///
    /// Uniqueness is left to the repository, which reports the first
    /// clashing field as `DomainError::DuplicateField`.
    pub async fn register_client(&self, new_client: NewClient) -> DomainResult<Account> {
        new_client.validate()?;

        let credential_hash = self.hash_credential(&new_client.password).await?;
        let now = self.clock.now();

        let account = Account::new_client(
            &new_client.email,
            new_client.name.trim().to_string(),
            credential_hash,
            ClientProfile {
                company_name: new_client.company_name.trim().to_string(),
                company_address: new_client.company_address.trim().to_string(),
                phone_number: new_client.phone_number.trim().to_string(),
                alternate_phone_number: new_client.alternate_phone_number.trim().to_string(),
                rc_number: new_client.rc_number.trim().to_string(),
                postal_code: new_client.postal_code.trim().to_string(),
                cac_document: new_client.cac_document,
            },
            now,
        );

        let created = self.repository.create(account).await.map_err(|e| {
            if let DomainError::DuplicateField { field } = &e {
                tracing::info!(
                    field = %field,
                    event = "registration_duplicate",
                    "Client registration rejected: duplicate field"
                );
            }
            e
        })?;

        tracing::info!(
            account_id = %created.id,
            email = %mask_email(&created.email),
            event = "client_registered",
            "Client registered"
        );

        let (account, _) = self
            .issue_code(created, CodePurpose::Verification, now)
            .await?;
        Ok(account)
    }

    /// Create an administrator; admins start verified and approved
    pub async fn create_admin(&self, new_admin: NewAdmin) -> DomainResult<Account> {
        new_admin.validate()?;

        let credential_hash = self.hash_credential(&new_admin.password).await?;
        let account = Account::new_admin(
            &new_admin.email,
            credential_hash,
            AdminProfile {
                user_name: new_admin.user_name.trim().to_string(),
                first_name: new_admin.first_name.trim().to_string(),
                last_name: new_admin.last_name.trim().to_string(),
            },
            self.clock.now(),
        );

        let created = self.repository.create(account).await?;

        tracing::info!(
            account_id = %created.id,
            email = %mask_email(&created.email),
            event = "admin_created",
            "Administrator account created"
        );
        Ok(created)
    }

    /// Seed the first administrator unless its user name or email is taken
    ///
    /// Returns whether an account was created.
    pub async fn ensure_bootstrap_admin(&self, new_admin: NewAdmin) -> DomainResult<bool> {
        if self
            .repository
            .find_by_login(&new_admin.user_name)
            .await?
            .is_some()
            || self.repository.find_by_email(&new_admin.email).await?.is_some()
        {
            tracing::debug!(user_name = %new_admin.user_name, "Bootstrap admin already present");
            return Ok(false);
        }

        match self.create_admin(new_admin).await {
            Ok(_) => Ok(true),
            // Another instance seeded it first
            Err(DomainError::DuplicateField { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
