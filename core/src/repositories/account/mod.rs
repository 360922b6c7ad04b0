pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;

pub use r#trait::{AccountRepository, ClientQuery};
pub use memory::InMemoryAccountRepository;
