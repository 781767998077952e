//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Config, StorageBackend};
use crate::errors::{AppError, AppResult};
use crate::infra::{ContextFactory, Database, MemoryStore};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let store: Arc<dyn ContextFactory> = match args.store {
        StorageBackend::Database => {
            let db = Database::connect(&config).await?;
            tracing::info!("Database connected");
            Arc::new(db)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store, commands are lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    // Build router
    let app = create_router(AppState::new(store));

    // Start server
    let addr = with_overrides(config, &args).server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// Command-line host and port take precedence over the environment
fn with_overrides(mut config: Config, args: &ServeArgs) -> Config {
    if let Some(host) = &args.host {
        config.server_host = host.clone();
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    config
}
