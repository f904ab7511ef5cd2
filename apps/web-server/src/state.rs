//! Application state.

use std::sync::Arc;

use record_store::RecordStore;

use crate::config::Config;
use crate::session::SessionRegistry;
use crate::views::Views;

/// Shared application state.
pub struct AppState<S: RecordStore> {
    /// Server configuration.
    pub config: Config,
    /// Record store.
    pub store: S,
    /// Session registry.
    pub sessions: SessionRegistry,
    /// Template environment.
    pub views: Views,
}

impl<S: RecordStore> AppState<S> {
    /// Creates new application state.
    pub fn new(config: Config, store: S, views: Views) -> Self {
        Self {
            config,
            store,
            sessions: SessionRegistry::new(),
            views,
        }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from config, store and views.
pub fn create_shared_state<S: RecordStore>(
    config: Config,
    store: S,
    views: Views,
) -> SharedState<S> {
    Arc::new(AppState::new(config, store, views))
}
