//! Client route handlers
//!
//! Sign-up, email verification, password reset and the client session.

pub mod password;
pub mod register;
pub mod session;
pub mod verification;

pub use password::{forgot_password, reset_password};
pub use register::register;
pub use session::{login, logout};
pub use verification::{resend_verification, verify_email};
