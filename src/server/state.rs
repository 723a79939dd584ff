//! # Estado Compartido
//! src/server/state.rs

use crate::jobs::JobManager;
use crate::metrics::MetricsCollector;

/// Estado que reciben todos los handlers
///
/// Se comparte entre threads de conexión detrás de un `Arc`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub jobs: JobManager,
    pub metrics: MetricsCollector,
}

impl AppState {
    pub fn new(jobs: JobManager) -> Self {
        Self {
            jobs,
            metrics: MetricsCollector::new(),
        }
    }
}
