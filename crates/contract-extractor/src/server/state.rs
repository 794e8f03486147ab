//! Application state for the extraction server

use std::sync::Arc;

use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::export::ReportExporter;
use crate::extraction::{AiServiceClient, ExtractionProvider};
use crate::ingestion::ParserRegistry;
use crate::processing::{Orchestrator, TaskStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: ExtractorConfig,
    /// Task registry
    store: Arc<TaskStore>,
    /// Batch orchestrator
    orchestrator: Arc<Orchestrator>,
    /// Remote extraction/OCR provider
    provider: Arc<dyn ExtractionProvider>,
}

impl AppState {
    /// Wire up parser registry, AI client, task store, and orchestrator.
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let provider: Arc<dyn ExtractionProvider> =
            Arc::new(AiServiceClient::new(&config.ai_service)?);
        Self::with_provider(config, provider)
    }

    /// Same wiring with an explicit provider (used by tests).
    pub fn with_provider(
        config: ExtractorConfig,
        provider: Arc<dyn ExtractionProvider>,
    ) -> Result<Self> {
        let store = Arc::new(TaskStore::new(config.server.max_retained_tasks));
        let parsers = Arc::new(ParserRegistry::new());
        let exporter = ReportExporter::new(config.output.dir.clone());

        let orchestrator = Arc::new(Orchestrator::new(
            Arc::clone(&store),
            parsers,
            Arc::clone(&provider),
            exporter,
        ));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                orchestrator,
                provider,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.inner.config
    }

    /// Get the task store
    pub fn store(&self) -> &TaskStore {
        &self.inner.store
    }

    /// Get the orchestrator
    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        &self.inner.orchestrator
    }

    /// Get the extraction provider
    pub fn provider(&self) -> &Arc<dyn ExtractionProvider> {
        &self.inner.provider
    }
}
