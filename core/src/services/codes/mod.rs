//! One-time code primitives
//!
//! - `generator` - random numeric codes from the OS entropy source
//! - `hasher` - salted code hashing and bcrypt credential hashing
//! - `expiry` - issue windows and the inclusive expiry check

mod expiry;
mod generator;
mod hasher;


pub use expiry::{ExpiryPolicy, IssueWindow};
pub use generator::{CodeGenerator, NumericCodeGenerator};
pub use hasher::{BcryptCredentialHasher, SaltedCodeHasher, SecretHasher};
