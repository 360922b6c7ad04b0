//! Shared utilities and common types for the E-Biding server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Utility functions (email masking, validation)
//! - Pagination and response envelopes

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    LifecycleConfig, LoggingConfig, MailConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use types::{ApiResponse, PageMeta, Pagination, PaginatedResponse};
pub use utils::{mask_email, validation};
