use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use eb_core::domain::entities::{Account, AccountRole, ApprovalState, ClientProfile};
use eb_core::domain::value_objects::AuthenticatedAccount;
use eb_core::services::{NewAdmin, NewClient};

/// Client sign-up form
///
/// Every field defaults to empty so that missing ones are reported together
/// by the registration service rather than one at a time by the parser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterClientRequest {
    pub company_name: String,
    pub company_address: String,
    pub phone_number: String,
    pub alternate_phone_number: String,
    #[serde(alias = "RcNumber")]
    pub rc_number: String,
    pub postal_code: String,
    pub name: String,
    pub email: String,
    pub password: String,
    /// Storage path of the already uploaded CAC document
    #[serde(alias = "cacDoc")]
    pub cac_document: String,
}

impl From<RegisterClientRequest> for NewClient {
    fn from(request: RegisterClientRequest) -> Self {
        NewClient {
            company_name: request.company_name,
            company_address: request.company_address,
            phone_number: request.phone_number,
            alternate_phone_number: request.alternate_phone_number,
            rc_number: request.rc_number,
            postal_code: request.postal_code,
            name: request.name,
            email: request.email,
            password: request.password,
            cac_document: request.cac_document,
        }
    }
}

/// Body of the resend-code and forgot-password endpoints
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 4, max = 12, message = "Invalid verification code"))]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 4, max = 12, message = "Invalid verification code"))]
    pub code: String,

    #[serde(alias = "password")]
    #[validate(length(min = 8, max = 128, message = "Password must be 8 to 128 characters"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientLoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Admins log in with their user name or email
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[serde(alias = "userName", alias = "email")]
    #[validate(length(min = 1, message = "User name is required"))]
    pub login: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAdminRequest {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
}

impl From<CreateAdminRequest> for NewAdmin {
    fn from(request: CreateAdminRequest) -> Self {
        NewAdmin {
            first_name: request.first_name,
            last_name: request.last_name,
            user_name: request.user_name,
            email: request.email,
            password: request.password,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyView {
    pub company_name: String,
    pub company_address: String,
    pub phone_number: String,
    pub alternate_phone_number: String,
    pub rc_number: String,
    pub postal_code: String,
    pub cac_document: String,
}

impl From<&ClientProfile> for CompanyView {
    fn from(profile: &ClientProfile) -> Self {
        Self {
            company_name: profile.company_name.clone(),
            company_address: profile.company_address.clone(),
            phone_number: profile.phone_number.clone(),
            alternate_phone_number: profile.alternate_phone_number.clone(),
            rc_number: profile.rc_number.clone(),
            postal_code: profile.postal_code.clone(),
            cac_document: profile.cac_document.clone(),
        }
    }
}

/// Public view of an account; never carries credential or code hashes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: Uuid,
    pub role: AccountRole,
    pub email: String,
    pub name: String,
    pub verified: bool,
    pub approved: bool,
    #[serde(flatten)]
    pub company: Option<CompanyView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            role: account.role(),
            email: account.email.clone(),
            name: account.display_name.clone(),
            verified: account.is_verified(),
            approved: account.is_approved(),
            company: account.client_profile().map(CompanyView::from),
            user_name: account.admin_profile().map(|p| p.user_name.clone()),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Identity carried by a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAccount {
    pub id: Uuid,
    pub role: AccountRole,
    pub email: String,
    pub name: String,
    pub approved: bool,
}

impl From<&AuthenticatedAccount> for SessionAccount {
    fn from(account: &AuthenticatedAccount) -> Self {
        Self {
            id: account.account_id,
            role: account.role,
            email: account.email.clone(),
            name: account.display_name.clone(),
            approved: account.approval == ApprovalState::Approved,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub account: SessionAccount,
}
