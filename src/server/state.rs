//! Server shared state
//!
//! Holds configuration and the analysis engine for the HTTP server.

use crate::analysis::{AnalysisEngine, CancelToken};
use crate::config::Config;
use crate::poi::azure::AzureMapsSource;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    /// The analysis engine; full analyses take the write lock, recomputes
    /// and status checks share the read lock
    pub engine: RwLock<AnalysisEngine<AzureMapsSource>>,

    /// Cancellation token of the most recent recompute request
    recompute_cancel: Mutex<Option<CancelToken>>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Self {
        let source = AzureMapsSource::new(config.api_keys.azure_maps.clone());
        Self {
            config: Arc::new(RwLock::new(config)),
            engine: RwLock::new(AnalysisEngine::new(source)),
            recompute_cancel: Mutex::new(None),
        }
    }

    /// Issue a fresh recompute token, cancelling any in-flight recompute
    ///
    /// Weight changes arriving faster than recomputes complete must
    /// supersede each other; only the latest request's result is
    /// observable.
    pub async fn supersede_recompute(&self) -> CancelToken {
        let mut slot = self.recompute_cancel.lock().await;
        let token = CancelToken::new();
        if let Some(previous) = slot.replace(token.clone()) {
            previous.cancel();
        }
        token
    }
}
