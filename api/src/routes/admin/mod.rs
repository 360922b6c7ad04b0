//! Admin route handlers
//!
//! Everything except login and logout sits behind the admin session guard.

pub mod auctions;
pub mod clients;
pub mod session;

pub use auctions::{create_auction, update_auction};
pub use clients::{approve_client, get_client, list_clients, reject_client};
pub use session::{create_admin, login, logout};
