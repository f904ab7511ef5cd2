//! MedSynQ web server binary.

use std::net::SocketAddr;

use record_store::SqliteRecordStore;
use web_server::{config::Config, create_app, create_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    tracing::info!("Starting MedSynQ web server");

    // Connect to the database and create the schema if absent
    let store = SqliteRecordStore::connect(&config.database_url).await?;

    // Create application state and router
    let state = create_state(config.clone(), store)?;
    let app = create_app(state);

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(addr = %addr, "Server listening");

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
