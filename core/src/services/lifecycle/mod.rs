//! Account lifecycle module
//!
//! This module provides the verification / reset / approval workflow:
//! - Code issuance with per-flow lifetimes
//! - Code confirmation with expiry and constant-time hash checks
//! - Admin approval and rejection of client registrations
//! - Client registration, admin provisioning and credential login

mod authentication;
mod config;
mod registration;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::LifecycleServiceConfig;
pub use service::LifecycleService;
pub use types::{validate_credential, IssuedCode, NewAdmin, NewClient, MIN_CREDENTIAL_LENGTH};
