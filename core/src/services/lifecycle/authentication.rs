//! Credential login

use eb_shared::mask_email;

use crate::domain::entities::AccountRole;
use crate::domain::value_objects::AuthenticatedAccount;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::AccountRepository;

use super::service::LifecycleService;

impl<R: AccountRepository> LifecycleService<R> {
    /// Check a login against the stored credential
    ///
    /// Clients log in by email, admins by email or user name. An unknown
    /// login, a login of the other role and a wrong password all fail with
    /// the same `AuthError::InvalidCredentials`. Unverified clients are told
    /// so only after their password checked out.
    pub async fn authenticate(
        &self,
        login: &str,
        password: &str,
        role: AccountRole,
    ) -> DomainResult<AuthenticatedAccount> {
        let found = match role {
            AccountRole::Client => self.repository.find_by_email(login).await?,
            AccountRole::Admin => self.repository.find_by_login(login).await?,
        };

        let Some(account) = found.filter(|account| account.role() == role) else {
            tracing::warn!(role = %role, event = "login_failed", "Unknown login");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self
            .verify_credential(password, &account.credential_hash)
            .await?
        {
            tracing::warn!(
                account_id = %account.id,
                role = %role,
                event = "login_failed",
                "Wrong credential"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        if !account.is_verified() {
            return Err(AuthError::AccountNotVerified.into());
        }

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&account.email),
            role = %role,
            event = "login_succeeded",
            "Account logged in"
        );
        Ok(AuthenticatedAccount::from(&account))
    }
}
