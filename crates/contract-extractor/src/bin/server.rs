//! Extraction server binary
//!
//! Run with: cargo run -p contract-extractor --bin contract-extractor-server

use contract_extractor::extraction::ExtractionProvider;
use contract_extractor::{config::ExtractorConfig, server::ExtractionServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contract_extractor=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ExtractorConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - AI service: {}", config.ai_service.base_url);
    tracing::info!("  - AI timeout: {}s", config.ai_service.timeout_secs);
    tracing::info!("  - Output dir: {}", config.output.dir.display());
    tracing::info!("  - Retained tasks: {}", config.server.max_retained_tasks);

    let server = ExtractionServer::new(config)?;

    // startup probe; processing still works once the service comes back
    match server.state().provider().health_check().await {
        Ok(true) => tracing::info!("AI extraction service is reachable"),
        _ => tracing::warn!("AI extraction service is not reachable, uploads will fail extraction until it is"),
    }

    tracing::info!("API: http://{}/api", server.address());
    tracing::info!("Health: http://{}/health", server.address());

    server.start().await?;

    Ok(())
}
