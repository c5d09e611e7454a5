//! Farmkeep record keeper - Backend Server

use std::net::SocketAddr;

use anyhow::Context;
use farmkeep_backend::{create_app, AppState, Config, Latency, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farmkeep_server=debug,farmkeep_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Farmkeep Server");
    tracing::info!("Environment: {}", config.environment);

    // Seed the entity store
    let latency = Latency::from_flag(config.store.simulate_latency);
    tracing::info!(
        data_dir = %config.store.data_dir,
        simulate_latency = config.store.simulate_latency,
        "Loading seed data..."
    );
    let store = Store::seed_from_dir(&config.store.data_dir, latency)
        .await
        .context("failed to load seed data")?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server address")?;

    // Build application
    let app = create_app(AppState::new(store, config));

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
