//! MedSynQ web server.
//!
//! A minimal multi-tenant patient-record application: tenants register,
//! their users authenticate with a cookie session, and each tenant manages
//! an isolated patient list behind server-rendered HTML.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

use axum::Router;
use record_store::RecordStore;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::{create_shared_state, SharedState};
use crate::views::Views;

/// Creates the application router with all routes configured.
pub fn create_app<S: RecordStore + 'static>(state: SharedState<S>) -> Router {
    routes::create_router(state).layer(TraceLayer::new_for_http())
}

/// Creates the application state with the given configuration and store.
pub fn create_state<S: RecordStore>(config: Config, store: S) -> anyhow::Result<SharedState<S>> {
    let views = Views::load(&config.templates_dir)?;
    Ok(create_shared_state(config, store, views))
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
