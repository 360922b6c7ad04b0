//! Configuration for the lifecycle service

use eb_shared::config::lifecycle::{
    DEFAULT_CODE_LENGTH, DEFAULT_CREDENTIAL_HASH_COST, DEFAULT_RESET_TTL_SECONDS,
    DEFAULT_VERIFICATION_TTL_SECONDS, MAX_CODE_LENGTH, MIN_CODE_LENGTH,
};
use eb_shared::LifecycleConfig;

use crate::errors::{DomainError, DomainResult};

/// Configuration for the lifecycle service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleServiceConfig {
    /// Seconds before an email verification code expires
    pub verification_ttl_seconds: i64,
    /// Seconds before a password reset code expires
    pub reset_ttl_seconds: i64,
    /// Digits per issued code
    pub code_length: usize,
    /// bcrypt cost for login credentials
    pub credential_hash_cost: u32,
}

impl Default for LifecycleServiceConfig {
    fn default() -> Self {
        Self {
            verification_ttl_seconds: DEFAULT_VERIFICATION_TTL_SECONDS,
            reset_ttl_seconds: DEFAULT_RESET_TTL_SECONDS,
            code_length: DEFAULT_CODE_LENGTH,
            credential_hash_cost: DEFAULT_CREDENTIAL_HASH_COST,
        }
    }
}

impl LifecycleServiceConfig {
    /// Code shape checks; lifetimes are checked by `ExpiryPolicy`
    pub fn validate(&self) -> DomainResult<()> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(DomainError::validation(format!(
                "code length must be between {} and {}",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH
            )));
        }
        Ok(())
    }
}

impl From<&LifecycleConfig> for LifecycleServiceConfig {
    fn from(config: &LifecycleConfig) -> Self {
        Self {
            verification_ttl_seconds: config.verification_ttl_seconds,
            reset_ttl_seconds: config.reset_ttl_seconds,
            code_length: config.code_length,
            credential_hash_cost: config.credential_hash_cost,
        }
    }
}
