use actix_web::{web, HttpResponse};

use eb_core::domain::entities::AccountRole;
use eb_core::repositories::{AccountRepository, AuctionRepository};

use crate::app::AppState;
use crate::dto::ClientLoginRequest;
use crate::handlers::ApiError;
use crate::routes::{logout_response, session_response, validated};

/// Handler for POST /client/login
///
/// Verified clients only. Approval is not needed to log in and is
/// reported as `account.approved`.
pub async fn login<A, B>(
    state: web::Data<AppState<A, B>>,
    request: web::Json<ClientLoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let request = validated(request.into_inner())?;
    let account = state
        .lifecycle
        .authenticate(&request.email, &request.password, AccountRole::Client)
        .await?;

    session_response(&state.sessions, &account, "Login successful")
}

/// Handler for POST /client/logout
pub async fn logout<A, B>(state: web::Data<AppState<A, B>>) -> HttpResponse
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    logout_response(&state.sessions, AccountRole::Client)
}
