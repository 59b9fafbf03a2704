//! Shared application state.
//!
//! Rendering is stateless: every request gets its own document. The state
//! only carries the immutable configuration handlers read from.

use std::sync::Arc;

use crate::config::ServerConfig;

/// Injected into Axum handlers via the `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self { config: Arc::new(config) }
    }
}
