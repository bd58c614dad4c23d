//! Shared handler state

use std::sync::Arc;
use std::time::Instant;
use waitline_core::application::QueueService;
use waitline_core::port::QueueStore;

/// Injected into every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<QueueService>,
    pub store: Arc<dyn QueueStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: Arc<QueueService>, store: Arc<dyn QueueStore>) -> Self {
        Self {
            service,
            store,
            started_at: Instant::now(),
        }
    }
}
