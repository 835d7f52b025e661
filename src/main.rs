use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use action_feed::config::AppConfig;
use action_feed::database::Database;
use action_feed::server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "action_feed=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting action feed");

    let config = AppConfig::load()?;
    info!("Configuration loaded");

    let database =
        Database::with_max_connections(&config.database_url, config.database_max_connections)
            .await?;
    info!("Database connected");

    database.run_migrations().await?;
    info!("Database schema ready");

    let addr = config.bind_address();
    let app = server::build_router(config, database);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
