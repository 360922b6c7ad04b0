use actix_web::{web, HttpResponse};

use eb_core::errors::{DomainError, LifecycleError};
use eb_core::repositories::{AccountRepository, AuctionRepository};
use eb_shared::{mask_email, ApiResponse};

use crate::app::AppState;
use crate::dto::{AccountView, EmailRequest, VerifyEmailRequest};
use crate::handlers::ApiError;
use crate::routes::validated;

const RESEND_MESSAGE: &str =
    "If the address belongs to an unverified account, a new code has been sent";

/// Handler for POST /client/verify-email/resend
///
/// Replaces the pending verification code with a fresh one. Unknown
/// addresses and already verified accounts get the same 202 as an
/// unverified one, with nothing sent.
pub async fn resend_verification<A, B>(
    state: web::Data<AppState<A, B>>,
    request: web::Json<EmailRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let request = validated(request.into_inner())?;

    match state.lifecycle.account_id_by_email(&request.email).await {
        Ok(account_id) => match state.lifecycle.request_verification(account_id).await {
            Ok(_) => {}
            Err(DomainError::Lifecycle(LifecycleError::AlreadyVerified)) => {
                tracing::info!(
                    account_id = %account_id,
                    event = "resend_already_verified",
                    "Verification resend for verified account"
                );
            }
            Err(e) => return Err(e.into()),
        },
        Err(DomainError::NotFound { .. }) => {
            tracing::info!(
                email = %mask_email(&request.email),
                event = "resend_unknown",
                "Verification resend for unknown address"
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(HttpResponse::Accepted().json(ApiResponse::message(RESEND_MESSAGE)))
}

/// Handler for POST /client/verify-email
///
/// # Request Body
///
/// ```json
/// { "email": "ada@acme.ng", "code": "482913" }
/// ```
///
/// # Errors
/// - 400 `VERIFICATION_CODE_INVALID` for a wrong code, no pending code or
///   an unknown address
/// - 400 `VERIFICATION_CODE_EXPIRED`
/// - 409 `ALREADY_VERIFIED`
pub async fn verify_email<A, B>(
    state: web::Data<AppState<A, B>>,
    request: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let request = validated(request.into_inner())?;

    let account_id = state
        .lifecycle
        .account_id_by_email(&request.email)
        .await
        .map_err(ApiError::code_flow)?;
    let account = state
        .lifecycle
        .confirm_verification(account_id, &request.code)
        .await
        .map_err(ApiError::code_flow)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Email verified successfully",
        AccountView::from(&account),
    )))
}
