use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use health_bot_api::api::create_application;
use health_bot_api::config::ServerConfig;
use health_bot_data::database::{get_connection_info, get_db_pool, initialize_database_pool};

/// The main entry point for the Health Bot API server
///
/// This function:
/// 1. Loads environment variables from a .env file
/// 2. Sets up tracing for logging
/// 3. Points the database at the data directory and initializes the pool
/// 4. Creates and starts the Axum web application
/// 5. Handles graceful shutdown
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    // Initialize tracing for structured logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(false)
            .with_ansi(true)
            .with_timer(fmt::time::uptime())
            .with_writer(std::io::stdout))
        .with(env_filter)
        .init();

    info!("🚀 Starting Health Bot API server");

    let config = ServerConfig::from_env().context("invalid server configuration")?;

    // Keep the database inside DATA_DIR unless a path was given explicitly
    if std::env::var("DB_SQLITE_PATH").is_err() {
        let db_path = config.database_path();
        std::env::set_var("DB_SQLITE_PATH", &db_path);
        info!("Set DB_SQLITE_PATH to {}", db_path.display());
    }

    match initialize_database_pool() {
        Ok(()) => {
            if let Ok(pool) = get_db_pool() {
                match get_connection_info(&pool) {
                    Ok(info) => info!("Database ready: {}", info),
                    Err(e) => warn!("Database ready, but could not describe it: {}", e),
                }
            }
        }
        Err(e) => {
            // The application falls back to an in-memory database
            error!("Failed to initialize database pool: {}", e);
        }
    }

    let app = create_application(&config)?;

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("🚀 Health Bot running at http://{}", addr);

    // Serve the application with graceful shutdown support
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for CTRL+C or, on Unix, SIGTERM
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server...");
}
