//! Application state shared by all handlers.

use std::sync::Arc;
use std::time::Instant;

use vidgate_core::Config;
use vidgate_extractor::Extractor;

/// Immutable per-process state. Handlers receive it as `State<Arc<AppState>>`.
pub struct AppState {
    pub config: Config,
    pub extractor: Arc<dyn Extractor>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config, extractor: Arc<dyn Extractor>) -> Arc<Self> {
        Arc::new(Self {
            config,
            extractor,
            started_at: Instant::now(),
        })
    }
}
