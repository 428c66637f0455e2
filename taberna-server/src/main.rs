//! taberna-server binary
//!
//! Loads `.env`, initializes logging, opens the database and serves HTTP
//! until Ctrl-C.

use taberna_server::{AppState, Config, api, logger};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    logger::init_logger(config.log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        slot_capacity = config.slot_capacity.get(),
        slot_interval_minutes = config.slot_interval_minutes,
        "Starting taberna-server"
    );

    let state = AppState::new(&config).await?;
    let app = api::build_app(state, &config);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("taberna-server HTTP listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("taberna-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
