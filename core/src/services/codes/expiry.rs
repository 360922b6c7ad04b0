//! Code validity windows

use chrono::{DateTime, Duration, Utc};

use eb_shared::config::lifecycle::MAX_CODE_TTL_SECONDS;

use crate::domain::entities::CodePurpose;
use crate::errors::{DomainError, DomainResult};

/// Issue and expiry instants of a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueWindow {
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Per-flow code lifetimes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    verification_ttl: Duration,
    reset_ttl: Duration,
}

impl ExpiryPolicy {
    /// Both lifetimes must be positive and at most `MAX_CODE_TTL_SECONDS`
    pub fn new(verification_ttl: Duration, reset_ttl: Duration) -> DomainResult<Self> {
        let max = Duration::seconds(MAX_CODE_TTL_SECONDS);
        for ttl in [verification_ttl, reset_ttl] {
            if ttl <= Duration::zero() || ttl > max {
                return Err(DomainError::validation(format!(
                    "code lifetimes must be between 1 and {} seconds",
                    MAX_CODE_TTL_SECONDS
                )));
            }
        }
        Ok(Self {
            verification_ttl,
            reset_ttl,
        })
    }

    pub fn from_seconds(verification_ttl: i64, reset_ttl: i64) -> DomainResult<Self> {
        let seconds = |ttl: i64| {
            Duration::try_seconds(ttl)
                .ok_or_else(|| DomainError::validation(format!("code lifetime {ttl}s is out of range")))
        };
        Self::new(seconds(verification_ttl)?, seconds(reset_ttl)?)
    }

    pub fn ttl_for(&self, purpose: CodePurpose) -> Duration {
        match purpose {
            CodePurpose::Verification => self.verification_ttl,
            CodePurpose::Reset => self.reset_ttl,
        }
    }

    /// Window for a code issued at `now` that lives for `ttl`
    ///
    /// A deadline past the representable range is a validation error.
    pub fn issue(now: DateTime<Utc>, ttl: Duration) -> DomainResult<IssueWindow> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| DomainError::validation("code deadline is out of range"))?;
        Ok(IssueWindow {
            issued_at: now,
            expires_at,
        })
    }

    /// Window for a `purpose` code issued at `now`
    pub fn issue_for(&self, purpose: CodePurpose, now: DateTime<Utc>) -> DomainResult<IssueWindow> {
        Self::issue(now, self.ttl_for(purpose))
    }

    /// A code is dead from its deadline onwards
    pub fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now >= expires_at
    }
}
