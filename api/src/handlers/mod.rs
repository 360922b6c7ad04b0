//! Request error handling shared by every route

pub mod error;

pub use error::{extractor_configs, ApiError};
