//! Account lifecycle state machine
//!
//! Email verification (`Unverified -> Verified`), password reset and the
//! admin approval decision. Every transition reads the clock once, loads
//! the account, checks its preconditions, and commits through a
//! compare-and-set save before any notification goes out.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use eb_shared::mask_email;

use crate::domain::entities::{Account, CodePurpose, ContactInfo, PendingCode};
use crate::domain::value_objects::{Notification, NotificationKind};
use crate::errors::{DomainError, DomainResult, LifecycleError};
use crate::repositories::AccountRepository;
use crate::services::clock::{Clock, SystemClock};
use crate::services::codes::{
    BcryptCredentialHasher, CodeGenerator, ExpiryPolicy, NumericCodeGenerator, SaltedCodeHasher,
    SecretHasher,
};
use crate::services::notification::NotificationDispatcher;

use super::config::LifecycleServiceConfig;
use super::types::{validate_credential, IssuedCode};

/// Lifecycle service driving verification, reset and approval
pub struct LifecycleService<R: AccountRepository> {
    /// Persistence port
    pub(super) repository: Arc<R>,
    /// Outbound notifications, never awaited
    pub(super) dispatcher: Arc<dyn NotificationDispatcher>,
    pub(super) code_generator: Arc<dyn CodeGenerator>,
    pub(super) code_hasher: Arc<dyn SecretHasher>,
    /// Separate instance for login credentials
    pub(super) credential_hasher: Arc<dyn SecretHasher>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) expiry: ExpiryPolicy,
}

impl<R: AccountRepository> LifecycleService<R> {
    /// Create a lifecycle service with production primitives
    ///
    /// # Arguments
    ///
    /// * `repository` - Account persistence
    /// * `dispatcher` - Notification dispatch port
    /// * `config` - Code lifetimes and shape
    pub fn new(
        repository: Arc<R>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        config: LifecycleServiceConfig,
    ) -> DomainResult<Self> {
        config.validate()?;
        let expiry =
            ExpiryPolicy::from_seconds(config.verification_ttl_seconds, config.reset_ttl_seconds)?;

        Ok(Self {
            repository,
            dispatcher,
            code_generator: Arc::new(NumericCodeGenerator::new(config.code_length)),
            code_hasher: Arc::new(SaltedCodeHasher::new()),
            credential_hasher: Arc::new(BcryptCredentialHasher::new(config.credential_hash_cost)),
            clock: Arc::new(SystemClock),
            expiry,
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_code_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.code_generator = generator;
        self
    }

    pub fn with_code_hasher(mut self, hasher: Arc<dyn SecretHasher>) -> Self {
        self.code_hasher = hasher;
        self
    }

    pub fn with_credential_hasher(mut self, hasher: Arc<dyn SecretHasher>) -> Self {
        self.credential_hasher = hasher;
        self
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Resolve the account registered under `email`
    pub async fn account_id_by_email(&self, email: &str) -> DomainResult<Uuid> {
        self.repository
            .find_by_email(email)
            .await?
            .map(|account| account.id)
            .ok_or_else(|| DomainError::not_found("Account"))
    }

    /// Issue (or reissue) the email verification code
    ///
    /// Only for unverified accounts. Any earlier pending code is replaced.
    pub async fn request_verification(&self, account_id: Uuid) -> DomainResult<IssuedCode> {
        let now = self.clock.now();
        let account = self.load(account_id).await?;

        if account.is_verified() {
            return Err(LifecycleError::AlreadyVerified.into());
        }

        let (_, issued) = self
            .issue_code(account, CodePurpose::Verification, now)
            .await?;
        Ok(issued)
    }

    /// Consume the verification code and mark the email verified
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - The verified account
    /// * `Err(LifecycleError::AlreadyVerified)` - Nothing left to confirm
    /// * `Err(LifecycleError::NoPendingCode | CodeExpired | CodeMismatch)` - Code rejected
    /// * `Err(DomainError::ConcurrentModification)` - Lost a race on this account
    pub async fn confirm_verification(
        &self,
        account_id: Uuid,
        candidate: &str,
    ) -> DomainResult<Account> {
        let now = self.clock.now();
        let mut account = self.load(account_id).await?;

        if account.is_verified() {
            return Err(LifecycleError::AlreadyVerified.into());
        }
        self.check_code(&account, CodePurpose::Verification, candidate, now)?;

        account.mark_verified(now);
        let saved = self.repository.update(account).await?;

        tracing::info!(
            account_id = %saved.id,
            email = %mask_email(&saved.email),
            event = "email_verified",
            "Account email verified"
        );
        self.dispatcher
            .send(Notification::new(NotificationKind::Welcome, saved.contact()));

        Ok(saved)
    }

    /// Issue a password reset code, whatever state the account is in
    pub async fn request_reset(&self, account_id: Uuid) -> DomainResult<IssuedCode> {
        let now = self.clock.now();
        let account = self.load(account_id).await?;

        let (_, issued) = self.issue_code(account, CodePurpose::Reset, now).await?;
        Ok(issued)
    }

    /// Consume the reset code and replace the login credential
    pub async fn confirm_reset(
        &self,
        account_id: Uuid,
        candidate: &str,
        new_credential: &str,
    ) -> DomainResult<()> {
        validate_credential(new_credential)?;

        let now = self.clock.now();
        let mut account = self.load(account_id).await?;

        self.check_code(&account, CodePurpose::Reset, candidate, now)?;

        let credential_hash = self.hash_credential(new_credential).await?;
        account.replace_credential(credential_hash, now);
        let saved = self.repository.update(account).await?;

        tracing::info!(
            account_id = %saved.id,
            email = %mask_email(&saved.email),
            event = "credential_reset",
            "Account credential replaced"
        );
        self.dispatcher
            .send(Notification::new(NotificationKind::ResetSuccess, saved.contact()));

        Ok(())
    }

    /// Approve a pending client
    pub async fn approve(&self, account_id: Uuid) -> DomainResult<Account> {
        let now = self.clock.now();
        let mut account = self.load(account_id).await?;

        if account.is_approved() {
            return Err(LifecycleError::AlreadyApproved.into());
        }

        account.mark_approved(now);
        let saved = self.repository.update(account).await?;

        tracing::info!(
            account_id = %saved.id,
            email = %mask_email(&saved.email),
            event = "account_approved",
            "Client account approved"
        );
        self.dispatcher
            .send(Notification::new(NotificationKind::Approved, saved.contact()));

        Ok(saved)
    }

    /// Reject a pending client by deleting its record
    ///
    /// The rejection notice goes to the contact captured before deletion,
    /// which is also returned.
    pub async fn reject(&self, account_id: Uuid) -> DomainResult<ContactInfo> {
        let account = self.load(account_id).await?;

        if account.is_approved() {
            return Err(LifecycleError::AlreadyApproved.into());
        }

        let contact = account.contact();
        self.repository.delete(account.id, account.version).await?;

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&contact.email),
            event = "account_rejected",
            "Client account rejected and removed"
        );
        self.dispatcher
            .send(Notification::new(NotificationKind::Rejected, contact.clone()));

        Ok(contact)
    }

    pub(super) async fn load(&self, account_id: Uuid) -> DomainResult<Account> {
        self.repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Account"))
    }

    /// Generate, hash and store a code, then hand the plaintext to the dispatcher
    pub(super) async fn issue_code(
        &self,
        mut account: Account,
        purpose: CodePurpose,
        now: DateTime<Utc>,
    ) -> DomainResult<(Account, IssuedCode)> {
        let code = self.code_generator.generate()?;
        let code_hash = self.code_hasher.hash(&code)?;
        let window = self.expiry.issue_for(purpose, now)?;

        account.issue_code(
            PendingCode::new(purpose, code_hash, window.issued_at, window.expires_at),
            now,
        );
        let saved = self.repository.update(account).await?;

        tracing::info!(
            account_id = %saved.id,
            email = %mask_email(&saved.email),
            purpose = %purpose,
            expires_at = %window.expires_at,
            event = "code_issued",
            "Issued one-time code"
        );

        let kind = match purpose {
            CodePurpose::Verification => NotificationKind::VerificationCode,
            CodePurpose::Reset => NotificationKind::ResetCode,
        };
        self.dispatcher
            .send(Notification::with_code(kind, saved.contact(), code));

        let issued = IssuedCode {
            account_id: saved.id,
            purpose,
            issued_at: window.issued_at,
            expires_at: window.expires_at,
        };
        Ok((saved, issued))
    }

    /// Pending code present, unexpired at `now` and matching `candidate`
    fn check_code(
        &self,
        account: &Account,
        purpose: CodePurpose,
        candidate: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let pending = account
            .pending_code_for(purpose)
            .ok_or(LifecycleError::NoPendingCode)?;

        if ExpiryPolicy::is_expired(pending.expires_at, now) {
            tracing::warn!(
                account_id = %account.id,
                purpose = %purpose,
                expired_at = %pending.expires_at,
                event = "code_expired",
                "Rejected expired code"
            );
            return Err(LifecycleError::CodeExpired.into());
        }

        let matches = self
            .code_hasher
            .verify(candidate, &pending.code_hash)
            .map_err(|e| {
                tracing::error!(
                    account_id = %account.id,
                    purpose = %purpose,
                    event = "corrupted_code_hash",
                    "Stored code hash could not be parsed"
                );
                e
            })?;
        if !matches {
            tracing::warn!(
                account_id = %account.id,
                purpose = %purpose,
                event = "code_rejected",
                "Code mismatch"
            );
            return Err(LifecycleError::CodeMismatch.into());
        }

        Ok(())
    }

    /// bcrypt off the async worker threads
    pub(super) async fn hash_credential(&self, secret: &str) -> DomainResult<String> {
        let hasher = Arc::clone(&self.credential_hasher);
        let secret = secret.to_owned();
        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| DomainError::internal(format!("credential hashing task failed: {e}")))??;
        Ok(hashed)
    }

    pub(super) async fn verify_credential(&self, candidate: &str, stored: &str) -> DomainResult<bool> {
        let hasher = Arc::clone(&self.credential_hasher);
        let candidate = candidate.to_owned();
        let stored = stored.to_owned();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&candidate, &stored))
            .await
            .map_err(|e| DomainError::internal(format!("credential check task failed: {e}")))??;
        Ok(matches)
    }
}
