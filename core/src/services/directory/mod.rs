//! Admin-facing client directory

mod service;

#[cfg(test)]
mod tests;

pub use service::ClientDirectory;
