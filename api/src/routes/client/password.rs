use actix_web::{web, HttpResponse};

use eb_core::errors::DomainError;
use eb_core::repositories::{AccountRepository, AuctionRepository};
use eb_shared::{mask_email, ApiResponse};

use crate::app::AppState;
use crate::dto::{EmailRequest, ResetPasswordRequest};
use crate::handlers::ApiError;
use crate::routes::validated;

const FORGOT_MESSAGE: &str = "If the address is registered, a reset code has been sent";

/// Handler for POST /client/forgot-password
///
/// Always answers 202 with the same message, whether or not the address
/// is registered.
pub async fn forgot_password<A, B>(
    state: web::Data<AppState<A, B>>,
    request: web::Json<EmailRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let request = validated(request.into_inner())?;

    match state.lifecycle.account_id_by_email(&request.email).await {
        Ok(account_id) => {
            state.lifecycle.request_reset(account_id).await?;
        }
        Err(DomainError::NotFound { .. }) => {
            tracing::info!(
                email = %mask_email(&request.email),
                event = "reset_requested_unknown",
                "Password reset for unknown address"
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(HttpResponse::Accepted().json(ApiResponse::message(FORGOT_MESSAGE)))
}

/// Handler for PUT /client/reset-password
///
/// # Request Body
///
/// ```json
/// { "email": "ada@acme.ng", "code": "482913", "newPassword": "another-long-one" }
/// ```
pub async fn reset_password<A, B>(
    state: web::Data<AppState<A, B>>,
    request: web::Json<ResetPasswordRequest>,
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
    state
        .lifecycle
        .confirm_reset(account_id, &request.code, &request.new_password)
        .await
        .map_err(ApiError::code_flow)?;

    Ok(HttpResponse::Ok().json(ApiResponse::message(
        "Password has been reset, you can now log in",
    )))
}
