//! Common type definitions shared across the server

pub mod pagination;
pub mod response;

pub use pagination::{PageMeta, PaginatedResponse, Pagination};
pub use response::{ApiResponse, ResponseStatus};
