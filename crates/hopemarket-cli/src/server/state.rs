//! Application state for the web server.

use std::sync::Arc;
use tokio::sync::Mutex;

use hopemarket::{Pipeline, TableCache};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Load, shape and render pipeline.
    pub pipeline: Arc<Pipeline>,
    /// Loaded tables, shared by every request.
    pub cache: Arc<Mutex<TableCache>>,
}

impl AppState {
    /// Create new application state with a cache using the configured policy.
    pub fn new(pipeline: Pipeline) -> Self {
        let cache = pipeline.new_cache();
        Self {
            pipeline: Arc::new(pipeline),
            cache: Arc::new(Mutex::new(cache)),
        }
    }
}
