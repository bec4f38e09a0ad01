//! Hostgate server binary.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use hostgate::adapters::http::{api_router, AppState};
use hostgate::adapters::postgres::{
    PostgresAccessControlStore, PostgresCustomerRepository, PostgresKillSwitchStore,
    PostgresRevenueLedger, PostgresSupportMessageStore, PostgresWebsiteRepository,
};
use hostgate::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "starting hostgate"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    let state = AppState {
        customers: Arc::new(PostgresCustomerRepository::new(pool.clone())),
        websites: Arc::new(PostgresWebsiteRepository::new(pool.clone())),
        access_control: Arc::new(PostgresAccessControlStore::new(pool.clone())),
        revenue: Arc::new(PostgresRevenueLedger::new(pool.clone())),
        kill_switch: Arc::new(PostgresKillSwitchStore::new(pool.clone())),
        support_messages: Arc::new(PostgresSupportMessageStore::new(pool)),
        security: config.security.clone(),
        sweep: config.sweep.clone(),
    };

    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any);

    let app = Router::new()
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
        .with_state(state);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
