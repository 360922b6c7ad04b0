use actix_web::{web, HttpResponse};
use uuid::Uuid;

use eb_core::repositories::{AccountRepository, AuctionRepository};
use eb_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{AccountView, ListQuery};
use crate::handlers::ApiError;
use crate::session::SessionClaims;

/// Handler for GET /admin/clients/all
///
/// Query: `page`, `limit`, `search`, `startDate`, `endDate`.
pub async fn list_clients<A, B>(
    state: web::Data<AppState<A, B>>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let page = state
        .directory
        .list_clients(query.to_client_query()?)
        .await?
        .map(|account| AccountView::from(&account));

    Ok(HttpResponse::Ok().json(ApiResponse::page("Clients retrieved successfully", page)))
}

/// Handler for GET /admin/client/{id}
pub async fn get_client<A, B>(
    state: web::Data<AppState<A, B>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let account = state.directory.get_client(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Client retrieved successfully",
        AccountView::from(&account),
    )))
}

/// Handler for PATCH /admin/client/{id}/approve
///
/// # Errors
/// - 404 `NOT_FOUND`
/// - 409 `ALREADY_APPROVED`, also for admin ids
/// - 409 `CONCURRENT_MODIFICATION` when the record changed mid-request
pub async fn approve_client<A, B>(
    state: web::Data<AppState<A, B>>,
    claims: SessionClaims,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let account = state.lifecycle.approve(path.into_inner()).await?;

    tracing::info!(
        account_id = %account.id,
        reviewed_by = %claims.sub,
        "Client approved from console"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Client approved successfully",
        AccountView::from(&account),
    )))
}

/// Handler for DELETE /admin/client/{id}/reject
///
/// Deletes the pending client and mails them the decision.
pub async fn reject_client<A, B>(
    state: web::Data<AppState<A, B>>,
    claims: SessionClaims,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let account_id = path.into_inner();
    state.lifecycle.reject(account_id).await?;

    tracing::info!(
        account_id = %account_id,
        reviewed_by = %claims.sub,
        "Client rejected from console"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::message("Client rejected and removed")))
}
