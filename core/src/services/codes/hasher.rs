//! Hashing for one-time codes and login credentials

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::errors::{LifecycleError, LifecycleResult};

const SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;

/// Hash a secret for storage and check candidates against stored hashes
pub trait SecretHasher: Send + Sync {
    /// Hash `secret`; two calls on the same input yield different outputs
    fn hash(&self, secret: &str) -> LifecycleResult<String>;

    /// Whether `candidate` produced `stored`
    ///
    /// A malformed `stored` value is `InvalidHashFormat`, not `false`.
    fn verify(&self, candidate: &str, stored: &str) -> LifecycleResult<bool>;
}

/// Salted SHA-256 for short-lived codes
///
/// Output format: `sha256$<salt hex>$<digest hex>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaltedCodeHasher;

impl SaltedCodeHasher {
    pub fn new() -> Self {
        Self
    }

    fn digest(salt: &[u8], secret: &str) -> [u8; DIGEST_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(secret.as_bytes());
        hasher.finalize().into()
    }

    fn parse(stored: &str) -> LifecycleResult<(Vec<u8>, Vec<u8>)> {
        let mut parts = stored.split('$');
        let (Some(scheme), Some(salt_hex), Some(digest_hex), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(LifecycleError::InvalidHashFormat);
        };
        if scheme != SCHEME {
            return Err(LifecycleError::InvalidHashFormat);
        }

        let salt = hex::decode(salt_hex).map_err(|_| LifecycleError::InvalidHashFormat)?;
        let digest = hex::decode(digest_hex).map_err(|_| LifecycleError::InvalidHashFormat)?;
        if salt.len() != SALT_LEN || digest.len() != DIGEST_LEN {
            return Err(LifecycleError::InvalidHashFormat);
        }
        Ok((salt, digest))
    }
}

impl SecretHasher for SaltedCodeHasher {
    fn hash(&self, secret: &str) -> LifecycleResult<String> {
        let mut salt = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|_| LifecycleError::RandomnessUnavailable)?;

        let digest = Self::digest(&salt, secret);
        Ok(format!(
            "{}${}${}",
            SCHEME,
            hex::encode(salt),
            hex::encode(digest)
        ))
    }

    fn verify(&self, candidate: &str, stored: &str) -> LifecycleResult<bool> {
        let (salt, expected) = Self::parse(stored)?;
        let actual = Self::digest(&salt, candidate);
        Ok(constant_time_eq(&actual, &expected))
    }
}

/// bcrypt for long-lived login credentials
///
/// CPU-bound; callers on the async runtime run it through `spawn_blocking`.
#[derive(Debug, Clone, Copy)]
pub struct BcryptCredentialHasher {
    cost: u32,
}

impl BcryptCredentialHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptCredentialHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl SecretHasher for BcryptCredentialHasher {
    fn hash(&self, secret: &str) -> LifecycleResult<String> {
        bcrypt::hash(secret, self.cost).map_err(|e| LifecycleError::HashingFailed {
            message: e.to_string(),
        })
    }

    fn verify(&self, candidate: &str, stored: &str) -> LifecycleResult<bool> {
        bcrypt::verify(candidate, stored).map_err(|_| LifecycleError::InvalidHashFormat)
    }
}
