//! Result of a successful login.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Account, AccountRole, ApprovalState};

/// Identity established by `authenticate`, used to mint a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedAccount {
    pub account_id: Uuid,
    pub role: AccountRole,
    pub email: String,
    pub display_name: String,
    /// Clients may log in before approval; the front-end gates features on this
    pub approval: ApprovalState,
}

impl From<&Account> for AuthenticatedAccount {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            role: account.role(),
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            approval: account.approval,
        }
    }
}
