//! Route handlers
//!
//! - `client`: registration, email verification, password reset, login
//! - `admin`: admin sessions, client review and auction management
//! - `public`: open auction listing, session check and health

pub mod admin;
pub mod client;
pub mod public;

use actix_web::HttpResponse;
use chrono::Utc;
use validator::Validate;

use eb_core::domain::entities::AccountRole;
use eb_core::domain::value_objects::AuthenticatedAccount;
use eb_shared::ApiResponse;

use crate::dto::{SessionAccount, SessionResponse};
use crate::handlers::ApiError;
use crate::session::SessionManager;

/// Run `validator` rules on a request body
pub(crate) fn validated<T: Validate>(request: T) -> Result<T, ApiError> {
    request
        .validate()
        .map_err(|errors| ApiError::from_validation_errors(&errors))?;
    Ok(request)
}

/// Sign a session for `account`; token in the body and in the role's cookie
pub(crate) fn session_response(
    sessions: &SessionManager,
    account: &AuthenticatedAccount,
    message: &str,
) -> Result<HttpResponse, ApiError> {
    let session = sessions.issue(account, Utc::now())?;
    let cookie = sessions.cookie(account.role, session.token.clone());

    Ok(HttpResponse::Ok().cookie(cookie).json(ApiResponse::success(
        message,
        SessionResponse {
            token: session.token,
            expires_at: session.expires_at,
            account: SessionAccount::from(account),
        },
    )))
}

/// Clear the session cookie of `role`
pub(crate) fn logout_response(sessions: &SessionManager, role: AccountRole) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(sessions.removal_cookie(role))
        .json(ApiResponse::message("Logged out successfully"))
}
