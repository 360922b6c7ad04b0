//! Endpoints without a role of their own

use actix_web::{web, HttpResponse};
use chrono::{TimeZone, Utc};

use eb_core::repositories::{AccountRepository, AuctionRepository};
use eb_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{AuctionResponse, ListQuery, SessionAccount};
use crate::handlers::ApiError;
use crate::session::SessionClaims;

/// Handler for GET /auctions/all
///
/// Query: `page`, `limit`, `search`, `startDate`, `endDate`, and
/// `status` (`open` or `closed`).
pub async fn list_auctions<A, B>(
    state: web::Data<AppState<A, B>>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let page = state
        .auctions
        .list_auctions(query.to_auction_filter()?)
        .await?
        .map(AuctionResponse::from);

    Ok(HttpResponse::Ok().json(ApiResponse::page("Auctions retrieved successfully", page)))
}

/// Handler for GET /validate-token
///
/// Echoes the admin session the guard accepted.
pub async fn validate_token(claims: SessionClaims) -> Result<HttpResponse, ApiError> {
    let account = SessionAccount {
        id: claims.account_id()?,
        role: claims.role,
        email: claims.email,
        name: claims.name,
        approved: claims.approved,
    };
    let expires_at = Utc.timestamp_opt(claims.exp, 0).single();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Token is valid",
        serde_json::json!({
            "account": account,
            "expiresAt": expires_at,
        }),
    )))
}

/// Health check endpoint handler
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "e-biding-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
