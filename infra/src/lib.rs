//! # Infrastructure Layer
//!
//! Concrete adapters for the ports defined in `eb_core`:
//! - **Database**: MySQL account and auction repositories using SQLx
//! - **Mail**: transactional email behind the core `NotificationDispatcher`
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Mail module - notification rendering and delivery
pub mod mail;

#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlAccountRepository, MySqlAuctionRepository, PoolStatistics};
pub use mail::{build_mailer, HttpMailer, LogMailer, MailDispatcher, Mailer};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[cfg(feature = "mysql")]
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail provider rejected or failed the request
    #[error("Mail service error: {0}")]
    Mail(String),
}
