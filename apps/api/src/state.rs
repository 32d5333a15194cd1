use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::editor::SessionRegistry;
use crate::export::{ExportFacility, PrintHtmlExporter};
use crate::layout::LayoutEngine;
use crate::persistence::{InMemoryResumeStore, ResumeStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable document store. Postgres when `DATABASE_URL` is set, memory otherwise.
    pub store: Arc<dyn ResumeStore>,
    /// Layout pipeline over the headless typesetter and A4 pages.
    pub engine: LayoutEngine,
    /// Pluggable export backend. Default: PrintHtmlExporter.
    pub exporter: Arc<dyn ExportFacility>,
    pub sessions: SessionRegistry,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn ResumeStore>, config: Config) -> Self {
        AppState {
            store,
            engine: LayoutEngine::default(),
            exporter: Arc::new(PrintHtmlExporter),
            sessions: SessionRegistry::default(),
            config,
        }
    }

    /// In-memory state with default config, for tests and database-less runs.
    pub fn in_memory() -> Self {
        AppState::new(Arc::new(InMemoryResumeStore::new()), Config::default())
    }

    pub fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.config.autosave_debounce_ms)
    }
}
