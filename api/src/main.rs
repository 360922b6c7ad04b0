use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use eb_api::{create_app, AppState, SessionManager};
use eb_core::repositories::{
    AccountRepository, AuctionRepository, InMemoryAccountRepository, InMemoryAuctionRepository,
};
use eb_core::services::{
    AuctionService, LifecycleService, LifecycleServiceConfig, NewAdmin, NotificationDispatcher,
};
use eb_infra::{build_mailer, DatabasePool, MailDispatcher, MySqlAccountRepository, MySqlAuctionRepository};
use eb_shared::config::LogFormat;
use eb_shared::{AppConfig, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    info!(
        environment = ?config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting E-Biding API server"
    );
    if config.auth.is_using_default_secret() {
        warn!("JWT secret is the development default, set JWT_SECRET");
    }

    let mailer = build_mailer(&config.mail).context("Failed to configure mail delivery")?;
    info!(provider = mailer.provider_name(), "Mail delivery configured");
    let dispatcher: Arc<dyn NotificationDispatcher> = Arc::new(MailDispatcher::new(mailer));

    if config.database.is_configured() {
        let pool = DatabasePool::new(&config.database)
            .await
            .context("Failed to connect to the database")?;
        if config.database.run_migrations {
            pool.migrate().await.context("Failed to run migrations")?;
        }
        info!(pool = %pool.statistics(), "Database connected");

        let accounts = Arc::new(MySqlAccountRepository::new(pool.inner().clone()));
        let auctions = Arc::new(MySqlAuctionRepository::new(pool.inner().clone()));
        let result = serve(&config, accounts, auctions, dispatcher).await;
        pool.close().await;
        result
    } else {
        warn!("No database configured, accounts and auctions are kept in memory");
        serve(
            &config,
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(InMemoryAuctionRepository::new()),
            dispatcher,
        )
        .await
    }
}

async fn serve<A, B>(
    config: &AppConfig,
    accounts: Arc<A>,
    auctions: Arc<B>,
    dispatcher: Arc<dyn NotificationDispatcher>,
) -> anyhow::Result<()>
where
    A: AccountRepository + 'static,
    B: AuctionRepository + 'static,
{
    let lifecycle = LifecycleService::new(
        accounts,
        dispatcher,
        LifecycleServiceConfig::from(&config.lifecycle),
    )?;

    if let Some(admin) = &config.auth.bootstrap_admin {
        let created = lifecycle
            .ensure_bootstrap_admin(NewAdmin {
                first_name: admin.first_name.clone(),
                last_name: admin.last_name.clone(),
                user_name: admin.user_name.clone(),
                email: admin.email.clone(),
                password: admin.password.clone(),
            })
            .await
            .context("Failed to seed the bootstrap admin")?;
        if created {
            info!(user_name = %admin.user_name, "Bootstrap admin created");
        }
    }

    let state = web::Data::new(AppState::new(
        lifecycle,
        AuctionService::new(auctions),
        SessionManager::new(&config.auth),
    ));

    let bind_address = config.server.bind_address();
    let cors = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;
    info!(address = %bind_address, "Server listening");

    let mut server =
        HttpServer::new(move || create_app(state.clone(), &cors, max_payload_size));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {bind_address}"))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
