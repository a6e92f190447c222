use anyhow::{Context, Result};
use fixture_catalog::routes::{router, AppState};
use fixture_catalog::utils::init_tracing;
use fixture_catalog::{Config, Database};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    init_tracing();

    let config = Config::from_env().context("Invalid configuration")?;

    let db = Database::connect(&config.database)
        .await
        .context("Failed to connect to the database")?;
    db.migrate().await.context("Failed to apply migrations")?;

    let app = router(AppState { db: db.clone() });

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    println!("\nStarting fixture catalog at http://{}", address);
    println!("Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server encountered an error")?;

    db.close().await;
    Ok(())
}
