//! Request and response bodies
//!
//! Wire names are camelCase, matching the web front-end.

pub mod account;
pub mod auction;
pub mod query;

pub use account::*;
pub use auction::*;
pub use query::*;
