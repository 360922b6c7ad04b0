//! Error kinds raised by the account lifecycle and by authentication

use thiserror::Error;

/// Failures of the code primitives and of lifecycle transitions
///
/// Every transition either commits a new state or returns one of these
/// without touching the stored account.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Secure randomness source unavailable")]
    RandomnessUnavailable,

    #[error("Stored hash has an invalid format")]
    InvalidHashFormat,

    #[error("No pending code for this account")]
    NoPendingCode,

    #[error("Code expired")]
    CodeExpired,

    #[error("Code does not match")]
    CodeMismatch,

    #[error("Account already verified")]
    AlreadyVerified,

    #[error("Account already approved")]
    AlreadyApproved,

    #[error("Hashing failed: {message}")]
    HashingFailed { message: String },
}

/// Authentication and authorization failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown account and wrong password share this variant
    #[error("Wrong username or password")]
    InvalidCredentials,

    #[error("Account email is not verified")]
    AccountNotVerified,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Insufficient permissions")]
    Forbidden,
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
