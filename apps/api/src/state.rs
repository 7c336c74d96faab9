use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::generation::gate::GenerationGate;
use crate::generation::sink::{DocumentSink, FileSink};
use crate::layout::font_metrics::{default_page_config, PageConfig};
use crate::models::form::FormState;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single form aggregate for this session. Mutated only through the
    /// form handlers, and only between generation runs.
    pub form: Arc<RwLock<FormState>>,
    /// Generation lifecycle token — at most one generation in flight.
    pub gate: Arc<GenerationGate>,
    /// Pluggable output sink. Default: atomic file writes into `OUTPUT_DIR`.
    pub sink: Arc<dyn DocumentSink>,
    pub config: Config,
    /// Fixed A4 page dimensions the composer lays out against.
    pub page_config: PageConfig,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sink = Arc::new(FileSink::new(config.output_dir.clone()));
        AppState {
            form: Arc::new(RwLock::new(FormState::default())),
            gate: Arc::new(GenerationGate::new()),
            sink,
            config,
            page_config: default_page_config(),
        }
    }
}
