//! kona - a read-only HTTP API server for SQLite climate-observation datasets
//!
//! This is the main entry point for the kona application.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use kona::{AppState, Config, KonaError, Result, Schema};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let (config, db_path) = Config::load()?;

    kona::init_tracing(&config.log_level);

    info!("Starting kona v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!("Loading dataset: {:?}", db_path);

    // Reflect the dataset schema. A missing file is logged but not fatal;
    // the server keeps running and queries fail at request time.
    let schema = match Schema::reflect(&db_path) {
        Ok(schema) => {
            info!("Database file found, proceeding...");
            schema
        }
        Err(e) => {
            error!("Error: Database file not found! ({})", e);
            Schema::fallback()
        }
    };

    kona::log_schema_stats(
        &db_path.display().to_string(),
        schema.station.name(),
        schema.measurement.name(),
        schema.station.columns().len() + schema.measurement.columns().len(),
    );

    // Create and validate the application state
    let app_state = AppState::new(config.clone(), db_path, schema);
    app_state.validate().map_err(|e| {
        error!("Invalid application state: {}", e);
        e
    })?;

    // Wrap in Arc for sharing
    let state = Arc::new(app_state);

    // Build the router
    let app = kona::router(state);

    // Create the server address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| KonaError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| KonaError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    // Set up graceful shutdown
    let shutdown_future = shutdown_signal();

    info!("Server is ready to accept connections");

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_future)
        .await
        .map_err(|e| KonaError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
