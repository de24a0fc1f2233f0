use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chariot_registry::config::Config;
use chariot_registry::db::Database;
use chariot_registry::handlers::AppState;
use chariot_registry::routes::create_router;

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration, opens the store and serves the
/// router until the process is stopped.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chariot_registry=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    let db = Database::new(&config.database_url).await?;
    tracing::info!("Database connection pool established");

    let app_state = Arc::new(AppState::new(config.clone(), db.pool.clone())?);
    let app = create_router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
