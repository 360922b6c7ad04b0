use actix_web::{web, HttpResponse};
use uuid::Uuid;

use eb_core::repositories::{AccountRepository, AuctionRepository};
use eb_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{AuctionRequest, AuctionResponse};
use crate::handlers::ApiError;

/// Handler for POST /admin/auction/create
///
/// The image is uploaded by the front-end; only its hosted URL is sent.
///
/// # Request Body
///
/// ```json
/// {
///     "auctionDescription": "Fleet disposal, Q3",
///     "itemDescription": "Four 2016 Toyota Hilux pickups",
///     "categories": ["vehicles"],
///     "requirements": ["Valid CAC certificate"],
///     "imageUrl": "https://img.example/hilux.jpg",
///     "startingAmount": 2500000,
///     "startDate": "2026-11-01T09:00:00Z",
///     "endDate": "2026-11-15T17:00:00Z"
/// }
/// ```
pub async fn create_auction<A, B>(
    state: web::Data<AppState<A, B>>,
    request: web::Json<AuctionRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let auction = state
        .auctions
        .create_auction(request.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Auction created successfully",
        AuctionResponse::from(auction),
    )))
}

/// Handler for PUT /admin/auction/update/{id}
///
/// Fields left out keep their stored values.
pub async fn update_auction<A, B>(
    state: web::Data<AppState<A, B>>,
    path: web::Path<Uuid>,
    request: web::Json<AuctionRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let auction = state
        .auctions
        .update_auction(path.into_inner(), request.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Auction updated successfully",
        AuctionResponse::from(auction),
    )))
}
