//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, LifecycleError, LifecycleResult};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Record was modified concurrently")]
    ConcurrentModification,

    #[error("Duplicate value for field: {field}")]
    DuplicateField { field: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl DomainError {
    /// Whether the caller may re-read and re-attempt the operation
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::ConcurrentModification)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
