//! Account entity covering both client companies and administrators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eb_shared::utils::validation::normalize_email;

use super::pending_code::{CodePurpose, PendingCode};

/// Email verification progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationState {
    Unverified,
    Verified,
}

/// Admin approval of a client's registration documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalState {
    Pending,
    Approved,
}

/// Who the account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Client,
    Admin,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Client => "client",
            AccountRole::Admin => "admin",
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(AccountRole::Client),
            "admin" => Ok(AccountRole::Admin),
            other => Err(format!("unknown account role: {other}")),
        }
    }
}

/// Company details captured at client registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub company_name: String,
    pub company_address: String,
    pub phone_number: String,
    pub alternate_phone_number: String,
    /// Corporate registration (RC) number
    pub rc_number: String,
    pub postal_code: String,
    /// Storage path of the uploaded incorporation document
    pub cac_document: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum AccountProfile {
    Client(ClientProfile),
    Admin(AdminProfile),
}

/// Where notifications for an account go
///
/// Captured by value so a rejected account can still be notified after
/// its record is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub name: String,
}

/// Account entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, never changes
    pub id: Uuid,

    /// Login and notification address (stored lowercased)
    pub email: String,

    /// Contact person (clients) or full name (admins)
    pub display_name: String,

    pub profile: AccountProfile,

    /// Hash of the login credential
    #[serde(skip_serializing)]
    pub credential_hash: String,

    pub verification: VerificationState,

    pub approval: ApprovalState,

    /// Outstanding verification or reset code, at most one
    #[serde(skip_serializing)]
    pub pending_code: Option<PendingCode>,

    /// Optimistic concurrency token, bumped by every successful save
    pub version: u64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a client account awaiting verification and approval
    pub fn new_client(
        email: &str,
        display_name: String,
        credential_hash: String,
        profile: ClientProfile,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            display_name,
            profile: AccountProfile::Client(profile),
            credential_hash,
            verification: VerificationState::Unverified,
            approval: ApprovalState::Pending,
            pending_code: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates an administrator; admins need neither verification nor approval
    pub fn new_admin(
        email: &str,
        credential_hash: String,
        profile: AdminProfile,
        now: DateTime<Utc>,
    ) -> Self {
        let display_name = format!("{} {}", profile.first_name, profile.last_name);
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            display_name,
            profile: AccountProfile::Admin(profile),
            credential_hash,
            verification: VerificationState::Verified,
            approval: ApprovalState::Approved,
            pending_code: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn role(&self) -> AccountRole {
        match self.profile {
            AccountProfile::Client(_) => AccountRole::Client,
            AccountProfile::Admin(_) => AccountRole::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role() == AccountRole::Admin
    }

    pub fn is_verified(&self) -> bool {
        self.verification == VerificationState::Verified
    }

    pub fn is_approved(&self) -> bool {
        self.approval == ApprovalState::Approved
    }

    pub fn client_profile(&self) -> Option<&ClientProfile> {
        match &self.profile {
            AccountProfile::Client(profile) => Some(profile),
            AccountProfile::Admin(_) => None,
        }
    }

    pub fn admin_profile(&self) -> Option<&AdminProfile> {
        match &self.profile {
            AccountProfile::Admin(profile) => Some(profile),
            AccountProfile::Client(_) => None,
        }
    }

    pub fn contact(&self) -> ContactInfo {
        ContactInfo {
            email: self.email.clone(),
            name: self.display_name.clone(),
        }
    }

    /// The pending code, if one exists and was issued for `purpose`
    pub fn pending_code_for(&self, purpose: CodePurpose) -> Option<&PendingCode> {
        self.pending_code
            .as_ref()
            .filter(|pending| pending.purpose == purpose)
    }

    /// Stores a freshly issued code, replacing whatever was pending
    pub fn issue_code(&mut self, code: PendingCode, now: DateTime<Utc>) {
        self.pending_code = Some(code);
        self.updated_at = now;
    }

    /// Marks the email as verified and consumes the verification code
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.verification = VerificationState::Verified;
        self.pending_code = None;
        self.updated_at = now;
    }

    /// Replaces the login credential and consumes the reset code
    pub fn replace_credential(&mut self, credential_hash: String, now: DateTime<Utc>) {
        self.credential_hash = credential_hash;
        self.pending_code = None;
        self.updated_at = now;
    }

    pub fn mark_approved(&mut self, now: DateTime<Utc>) {
        self.approval = ApprovalState::Approved;
        self.updated_at = now;
    }

    /// Values that must be unique across accounts, keyed by field name
    ///
    /// Field names match the ones reported by `DomainError::DuplicateField`.
    pub fn unique_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("email", self.email.clone())];
        match &self.profile {
            AccountProfile::Client(profile) => {
                fields.push(("company_name", profile.company_name.to_lowercase()));
                fields.push(("phone_number", profile.phone_number.clone()));
                fields.push((
                    "alternate_phone_number",
                    profile.alternate_phone_number.clone(),
                ));
                fields.push(("rc_number", profile.rc_number.to_uppercase()));
            }
            AccountProfile::Admin(profile) => {
                fields.push(("user_name", profile.user_name.to_lowercase()));
            }
        }
        fields
    }
}
