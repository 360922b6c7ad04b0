//! Verification and password reset code policy

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Default lifetime of an email verification code (10 minutes)
pub const DEFAULT_VERIFICATION_TTL_SECONDS: i64 = 600;

/// Default lifetime of a password reset code (30 minutes)
pub const DEFAULT_RESET_TTL_SECONDS: i64 = 1800;

/// Default number of digits in an issued code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default bcrypt work factor for account credentials
pub const DEFAULT_CREDENTIAL_HASH_COST: u32 = 10;

/// Shortest code that may be issued
pub const MIN_CODE_LENGTH: usize = 4;
/// Longest code that may be issued
pub const MAX_CODE_LENGTH: usize = 12;

/// Upper bound on either code lifetime (7 days)
pub const MAX_CODE_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Per-flow code lifetimes and code shape
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LifecycleConfig {
    /// Seconds an email verification code stays valid
    #[serde(default = "default_verification_ttl")]
    pub verification_ttl_seconds: i64,

    /// Seconds a password reset code stays valid
    #[serde(default = "default_reset_ttl")]
    pub reset_ttl_seconds: i64,

    /// Number of digits in issued codes
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// bcrypt cost used for login credentials (4..=31)
    #[serde(default = "default_credential_hash_cost")]
    pub credential_hash_cost: u32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            verification_ttl_seconds: DEFAULT_VERIFICATION_TTL_SECONDS,
            reset_ttl_seconds: DEFAULT_RESET_TTL_SECONDS,
            code_length: DEFAULT_CODE_LENGTH,
            credential_hash_cost: DEFAULT_CREDENTIAL_HASH_COST,
        }
    }
}

impl LifecycleConfig {
    /// TTLs in `1..=MAX_CODE_TTL_SECONDS`, so that `expires_at > issued_at`
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, ttl) in [
            ("verification_ttl_seconds", self.verification_ttl_seconds),
            ("reset_ttl_seconds", self.reset_ttl_seconds),
        ] {
            if !(1..=MAX_CODE_TTL_SECONDS).contains(&ttl) {
                return Err(ConfigError::Invalid {
                    message: format!(
                        "lifecycle.{} must be between 1 and {}",
                        name, MAX_CODE_TTL_SECONDS
                    ),
                });
            }
        }
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(ConfigError::Invalid {
                message: format!(
                    "lifecycle.code_length must be between {} and {}",
                    MIN_CODE_LENGTH, MAX_CODE_LENGTH
                ),
            });
        }
        if !(4..=31).contains(&self.credential_hash_cost) {
            return Err(ConfigError::Invalid {
                message: "lifecycle.credential_hash_cost must be between 4 and 31".to_string(),
            });
        }
        Ok(())
    }
}

fn default_verification_ttl() -> i64 {
    DEFAULT_VERIFICATION_TTL_SECONDS
}

fn default_reset_ttl() -> i64 {
    DEFAULT_RESET_TTL_SECONDS
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

fn default_credential_hash_cost() -> u32 {
    DEFAULT_CREDENTIAL_HASH_COST
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_differ_per_flow() {
        let config = LifecycleConfig::default();
        assert_eq!(config.verification_ttl_seconds, 600);
        assert_eq!(config.reset_ttl_seconds, 1800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_code_length_bounds() {
        let mut config = LifecycleConfig::default();
        config.code_length = 3;
        assert!(config.validate().is_err());
        config.code_length = 13;
        assert!(config.validate().is_err());
        config.code_length = 8;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_oversized_ttl_rejected() {
        let config = LifecycleConfig {
            reset_ttl_seconds: 9_000_000_000_000_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LifecycleConfig {
            verification_ttl_seconds: MAX_CODE_TTL_SECONDS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_verification_ttl_rejected() {
        let config = LifecycleConfig {
            verification_ttl_seconds: -1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
