use actix_web::{web, HttpResponse};

use eb_core::domain::entities::AccountRole;
use eb_core::repositories::{AccountRepository, AuctionRepository};
use eb_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{AccountView, AdminLoginRequest, CreateAdminRequest};
use crate::handlers::ApiError;
use crate::routes::{logout_response, session_response, validated};
use crate::session::SessionClaims;

/// Handler for POST /admin/login
///
/// `login` may be the user name or the email address.
pub async fn login<A, B>(
    state: web::Data<AppState<A, B>>,
    request: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let request = validated(request.into_inner())?;
    let account = state
        .lifecycle
        .authenticate(&request.login, &request.password, AccountRole::Admin)
        .await?;

    session_response(&state.sessions, &account, "Admin login successful")
}

/// Handler for POST /admin/logout
pub async fn logout<A, B>(state: web::Data<AppState<A, B>>) -> HttpResponse
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    logout_response(&state.sessions, AccountRole::Admin)
}

/// Handler for POST /admin/create
pub async fn create_admin<A, B>(
    state: web::Data<AppState<A, B>>,
    claims: SessionClaims,
    request: web::Json<CreateAdminRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let account = state
        .lifecycle
        .create_admin(request.into_inner().into())
        .await?;

    tracing::info!(
        account_id = %account.id,
        created_by = %claims.sub,
        "Administrator created from console"
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Admin created successfully",
        AccountView::from(&account),
    )))
}
