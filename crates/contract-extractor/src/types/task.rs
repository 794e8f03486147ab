//! Task entity for one batch submission

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use super::contract::ExtractionResult;

/// Task lifecycle status.
///
/// Transitions are strictly forward: `Pending` → `Processing` → `Completed`.
/// There is no failed status; per-file failures are tracked as counters and
/// a task completes once every file has been attempted exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
}

/// One tracked unit of work corresponding to a batch submission of files.
///
/// Created at submission, mutated exclusively by its own background unit,
/// read concurrently by status queries. Immutable after completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub status: TaskStatus,
    /// Percentage in [0, 100]; always `processed / total_files * 100`
    pub progress: f64,
    pub total_files: usize,
    /// Files attempted so far (successes and failures both count)
    pub processed: usize,
    /// Files that failed to parse or extract
    pub failed: usize,
    /// Report artifact path, set after a successful export
    pub result_path: Option<PathBuf>,
    /// Task-level error note (export failure); does not affect status
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Results in processing order
    pub results: Vec<ExtractionResult>,
}

impl Task {
    /// Create a fresh pending task for `total_files` files.
    pub fn new(total_files: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: TaskStatus::Pending,
            progress: 0.0,
            total_files,
            processed: 0,
            failed: 0,
            result_path: None,
            error: None,
            created_at: Utc::now(),
            completed_at: None,
            results: Vec::new(),
        }
    }

    /// True once the task reached its terminal state.
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}
