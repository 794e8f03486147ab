//! Upload endpoint: accepts a multipart batch and submits a task

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::processing::FileData;
use crate::server::state::AppState;
use crate::types::task::TaskStatus;

/// Response for a submitted batch
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub task_id: Uuid,
    pub status: TaskStatus,
    pub total_files: usize,
    pub message: String,
}

/// POST /api/upload - Upload files and start background extraction
pub async fn upload_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::invalid_request(format!("failed to read multipart field: {}", e)))?
    {
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            // non-file fields are ignored
            continue;
        };

        let data = match field.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                tracing::warn!(file = %filename, error = %e, "Failed to read uploaded file");
                continue;
            }
        };

        tracing::info!(file = %filename, bytes = data.len(), "Queued file");
        files.push(FileData { filename, data });
    }

    if files.is_empty() {
        return Err(Error::invalid_request("no files uploaded"));
    }

    let task = state.orchestrator().submit(files);

    Ok(Json(UploadResponse {
        task_id: task.id,
        status: task.status,
        total_files: task.total_files,
        message: "files uploaded successfully, processing started".to_string(),
    }))
}
