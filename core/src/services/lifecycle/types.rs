//! Inputs and results of lifecycle operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eb_shared::utils::validation::{is_valid_email, is_valid_phone, length_between, not_empty};

use crate::domain::entities::CodePurpose;
use crate::errors::{DomainError, DomainResult};

/// Shortest accepted login credential
pub const MIN_CREDENTIAL_LENGTH: usize = 8;
const MAX_CREDENTIAL_LENGTH: usize = 128;

/// A client company signing up
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewClient {
    pub company_name: String,
    pub company_address: String,
    pub phone_number: String,
    pub alternate_phone_number: String,
    pub rc_number: String,
    pub postal_code: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub cac_document: String,
}

impl NewClient {
    pub fn validate(&self) -> DomainResult<()> {
        let required = [
            ("company_name", &self.company_name),
            ("company_address", &self.company_address),
            ("phone_number", &self.phone_number),
            ("alternate_phone_number", &self.alternate_phone_number),
            ("rc_number", &self.rc_number),
            ("postal_code", &self.postal_code),
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
            ("cac_document", &self.cac_document),
        ];
        ensure_present(&required)?;

        if !is_valid_email(self.email.trim()) {
            return Err(DomainError::validation("Invalid email address"));
        }
        for (field, phone) in [
            ("phone_number", &self.phone_number),
            ("alternate_phone_number", &self.alternate_phone_number),
        ] {
            if !is_valid_phone(phone) {
                return Err(DomainError::validation(format!("Invalid {field}")));
            }
        }
        validate_credential(&self.password)
    }
}

/// An administrator account to create
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAdmin {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
}

impl NewAdmin {
    pub fn validate(&self) -> DomainResult<()> {
        ensure_present(&[
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("user_name", &self.user_name),
            ("email", &self.email),
            ("password", &self.password),
        ])?;
        if !is_valid_email(self.email.trim()) {
            return Err(DomainError::validation("Invalid email address"));
        }
        validate_credential(&self.password)
    }
}

/// Receipt for a freshly issued code; never carries the code itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssuedCode {
    pub account_id: Uuid,
    pub purpose: CodePurpose,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Length policy for login credentials
pub fn validate_credential(password: &str) -> DomainResult<()> {
    if !length_between(password, MIN_CREDENTIAL_LENGTH, MAX_CREDENTIAL_LENGTH) {
        return Err(DomainError::validation(format!(
            "Password must be between {} and {} characters",
            MIN_CREDENTIAL_LENGTH, MAX_CREDENTIAL_LENGTH
        )));
    }
    Ok(())
}

/// All blank fields are reported in one error
fn ensure_present(fields: &[(&str, &String)]) -> DomainResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| !not_empty(value))
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}
