//! Application state and factory
//!
//! This module holds the shared services and builds the Actix-web
//! application with every route under `/api/v1/e-biding`.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use eb_core::repositories::{AccountRepository, AuctionRepository};
use eb_core::services::{AuctionService, ClientDirectory, LifecycleService};
use eb_shared::{error_codes, CorsConfig, ErrorResponse};

use crate::handlers::extractor_configs;
use crate::middleware::{create_cors, SessionAuth};
use crate::routes::{admin, client, public};
use crate::session::SessionManager;

pub const API_PREFIX: &str = "/api/v1/e-biding";

/// Application state that holds shared services
pub struct AppState<A, B>
where
    A: AccountRepository,
    B: AuctionRepository,
{
    pub lifecycle: Arc<LifecycleService<A>>,
    pub directory: Arc<ClientDirectory<A>>,
    pub auctions: Arc<AuctionService<B>>,
    pub sessions: Arc<SessionManager>,
}

impl<A, B> AppState<A, B>
where
    A: AccountRepository,
    B: AuctionRepository,
{
    /// Wire the services over one account store and one auction store
    pub fn new(
        lifecycle: LifecycleService<A>,
        auctions: AuctionService<B>,
        sessions: SessionManager,
    ) -> Self {
        let directory = ClientDirectory::new(Arc::clone(lifecycle.repository()));
        Self {
            lifecycle: Arc::new(lifecycle),
            directory: Arc::new(directory),
            auctions: Arc::new(auctions),
            sessions: Arc::new(sessions),
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<A, B>(
    app_state: web::Data<AppState<A, B>>,
    cors_config: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let sessions = Arc::clone(&app_state.sessions);
    let admin_only = || SessionAuth::admin(Arc::clone(&sessions));
    let (json_config, query_config, path_config) = extractor_configs(max_payload_size);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .app_data(query_config)
        .app_data(path_config)
        // The last `wrap` is the outermost layer
        .wrap(TracingLogger::default())
        .wrap(create_cors(cors_config))
        .service(
            web::scope(API_PREFIX)
                .route("/health", web::get().to(public::health))
                .route("/auctions/all", web::get().to(public::list_auctions::<A, B>))
                .route(
                    "/validate-token",
                    web::get()
                        .to(public::validate_token)
                        .wrap(admin_only()),
                )
                .service(
                    web::scope("/client")
                        .route("/create", web::post().to(client::register::<A, B>))
                        .route(
                            "/verify-email/resend",
                            web::post().to(client::resend_verification::<A, B>),
                        )
                        .route("/verify-email", web::post().to(client::verify_email::<A, B>))
                        .route("/login", web::post().to(client::login::<A, B>))
                        .route(
                            "/forgot-password",
                            web::post().to(client::forgot_password::<A, B>),
                        )
                        .route("/reset-password", web::put().to(client::reset_password::<A, B>))
                        .route("/logout", web::post().to(client::logout::<A, B>)),
                )
                .service(
                    web::scope("/admin")
                        .route("/login", web::post().to(admin::login::<A, B>))
                        .route("/logout", web::post().to(admin::logout::<A, B>))
                        .route(
                            "/create",
                            web::post()
                                .to(admin::create_admin::<A, B>)
                                .wrap(admin_only()),
                        )
                        .route(
                            "/clients/all",
                            web::get()
                                .to(admin::list_clients::<A, B>)
                                .wrap(admin_only()),
                        )
                        .route(
                            "/client/{id}",
                            web::get()
                                .to(admin::get_client::<A, B>)
                                .wrap(admin_only()),
                        )
                        .route(
                            "/client/{id}/approve",
                            web::patch()
                                .to(admin::approve_client::<A, B>)
                                .wrap(admin_only()),
                        )
                        .route(
                            "/client/{id}/reject",
                            web::delete()
                                .to(admin::reject_client::<A, B>)
                                .wrap(admin_only()),
                        )
                        .route(
                            "/auction/create",
                            web::post()
                                .to(admin::create_auction::<A, B>)
                                .wrap(admin_only()),
                        )
                        .route(
                            "/auction/update/{id}",
                            web::put()
                                .to(admin::update_auction::<A, B>)
                                .wrap(admin_only()),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
