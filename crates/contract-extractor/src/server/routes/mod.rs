//! API routes for the extraction server

pub mod ingest;
pub mod tasks;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::ingestion::ParserRegistry;
use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Ingestion - with larger body limit for file uploads
        .route(
            "/upload",
            post(ingest::upload_files).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Task lifecycle
        .route("/tasks/:task_id", get(tasks::get_task_status))
        .route("/tasks/:task_id", delete(tasks::delete_task))
        .route("/tasks/:task_id/results", get(tasks::get_task_results))
        .route("/tasks/:task_id/download", get(tasks::download_result))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "contract-extractor",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Contract key-term extraction with OCR escalation and spreadsheet reports",
        "supported_formats": ParserRegistry::supported_extensions(),
        "endpoints": {
            "POST /api/upload": "Upload contract documents, returns a task id",
            "GET /api/tasks/:id": "Poll task status and progress",
            "GET /api/tasks/:id/results": "Structured extraction results",
            "GET /api/tasks/:id/download": "Download the report artifact",
            "DELETE /api/tasks/:id": "Remove a task from the registry"
        }
    }))
}
