//! Task status, results, artifact download, and deletion endpoints

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::contract::ExtractionResult;
use crate::types::task::{Task, TaskStatus};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Task snapshot as returned to pollers
#[derive(Debug, Serialize)]
pub struct TaskStatusResponse {
    pub task_id: Uuid,
    pub status: TaskStatus,
    pub progress: f64,
    pub total_files: usize,
    pub processed: usize,
    pub failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl From<Task> for TaskStatusResponse {
    fn from(task: Task) -> Self {
        Self {
            task_id: task.id,
            status: task.status,
            progress: task.progress,
            total_files: task.total_files,
            processed: task.processed,
            failed: task.failed,
            result_path: task
                .result_path
                .as_ref()
                .map(|p| p.display().to_string()),
            error: task.error,
            created_at: format_timestamp(task.created_at),
            completed_at: task.completed_at.map(format_timestamp),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskResultsResponse {
    pub success: bool,
    pub message: String,
    pub results: Vec<ExtractionResult>,
}

/// GET /api/tasks/:task_id - Task snapshot
pub async fn get_task_status(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<TaskStatusResponse>> {
    let task = state.store().get(task_id)?;
    Ok(Json(task.into()))
}

/// GET /api/tasks/:task_id/results - Extraction results (empty before the
/// first file succeeds)
pub async fn get_task_results(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<TaskResultsResponse>> {
    let results = state.store().results(task_id)?;
    Ok(Json(TaskResultsResponse {
        success: true,
        message: "extraction completed".to_string(),
        results,
    }))
}

/// GET /api/tasks/:task_id/download - Report artifact as an attachment
pub async fn download_result(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let task = state.store().get(task_id)?;

    if task.status != TaskStatus::Completed {
        return Err(Error::TaskNotReady("task not completed yet".to_string()));
    }
    let Some(path) = task.result_path else {
        return Err(Error::TaskNotFound(task_id));
    };

    let bytes = tokio::fs::read(&path).await?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("extraction_result.xlsx")
        .to_string();

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    ))
}

/// DELETE /api/tasks/:task_id - Drop a task from the registry
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    state.store().remove(task_id)?;
    Ok(Json(serde_json::json!({ "deleted": task_id })))
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
