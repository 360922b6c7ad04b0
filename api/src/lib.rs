//! # E-Biding API
//!
//! actix-web server for client onboarding (sign-up, email verification,
//! password reset), admin review of registrations and auction listings.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;

pub use app::{create_app, AppState, API_PREFIX};
pub use handlers::ApiError;
pub use session::SessionManager;
