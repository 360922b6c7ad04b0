use actix_web::{web, HttpResponse};

use eb_core::repositories::{AccountRepository, AuctionRepository};
use eb_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{AccountView, RegisterClientRequest};
use crate::handlers::ApiError;

/// Handler for POST /client/create
///
/// Creates an unverified, pending client and mails the first
/// verification code.
///
/// # Request Body
///
/// ```json
/// {
///     "companyName": "Acme Logistics Ltd",
///     "companyAddress": "12 Marina Road, Lagos",
///     "phoneNumber": "08031234567",
///     "alternatePhoneNumber": "08039876543",
///     "rcNumber": "RC123456",
///     "postalCode": "101001",
///     "name": "Ada Obi",
///     "email": "ada@acme.ng",
///     "password": "a-long-password",
///     "cacDocument": "uploads/cac/acme.pdf"
/// }
/// ```
///
/// # Errors
/// - 400 `VALIDATION_ERROR` for missing or malformed fields
/// - 409 `DUPLICATE_FIELD` with the clashing field in `details.field`
pub async fn register<A, B>(
    state: web::Data<AppState<A, B>>,
    request: web::Json<RegisterClientRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let account = state
        .lifecycle
        .register_client(request.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Registration successful, a verification code has been sent to your email",
        AccountView::from(&account),
    )))
}
