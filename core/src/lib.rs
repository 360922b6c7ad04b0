//! # E-Biding Core
//!
//! Core business logic and domain layer for the E-Biding backend.
//! This crate contains the account lifecycle (email verification, password
//! reset, admin approval), the one-time code primitives it is built from,
//! auction listings, repository interfaces and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
