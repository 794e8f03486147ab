//! In-memory task registry

use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::contract::ExtractionResult;
use crate::types::task::{Task, TaskStatus};

/// Registry of tasks keyed by identifier.
///
/// Mutations go through per-entry closures on the backing map, so a
/// concurrent status query always observes a consistent snapshot (counters
/// and result list move together). There is no global lock across tasks.
///
/// Completed tasks are retained up to `max_retained`; beyond that the oldest
/// completed tasks are evicted at insertion time. Running tasks are never
/// evicted.
pub struct TaskStore {
    tasks: DashMap<Uuid, Task>,
    /// Insertion order, for oldest-first eviction
    order: Mutex<VecDeque<Uuid>>,
    max_retained: usize,
}

impl TaskStore {
    pub fn new(max_retained: usize) -> Self {
        Self {
            tasks: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            max_retained: max_retained.max(1),
        }
    }

    /// Register a new task and evict old completed tasks past the cap.
    pub fn insert(&self, task: Task) {
        self.order.lock().push_back(task.id);
        self.tasks.insert(task.id, task);
        self.evict_completed();
    }

    /// Snapshot of a task.
    pub fn get(&self, id: Uuid) -> Result<Task> {
        self.tasks
            .get(&id)
            .map(|t| t.clone())
            .ok_or(Error::TaskNotFound(id))
    }

    /// Results accumulated so far (empty before the first success).
    pub fn results(&self, id: Uuid) -> Result<Vec<ExtractionResult>> {
        Ok(self.get(id)?.results)
    }

    /// Remove a task explicitly.
    pub fn remove(&self, id: Uuid) -> Result<Task> {
        let (_, task) = self.tasks.remove(&id).ok_or(Error::TaskNotFound(id))?;
        self.order.lock().retain(|entry| *entry != id);
        Ok(task)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Transition a pending task to processing.
    pub fn mark_processing(&self, id: Uuid) {
        self.with_task(id, |task| {
            if task.status == TaskStatus::Pending {
                task.status = TaskStatus::Processing;
            }
        });
    }

    /// Record one successfully processed file.
    pub fn record_success(&self, id: Uuid, result: ExtractionResult) {
        self.with_task(id, |task| {
            task.results.push(result);
            task.processed += 1;
            update_progress(task);
        });
    }

    /// Record one failed file (still counts as attempted).
    pub fn record_failure(&self, id: Uuid) {
        self.with_task(id, |task| {
            task.failed += 1;
            task.processed += 1;
            update_progress(task);
        });
    }

    /// Finalize a task. Export failure is recorded as a task-level note and
    /// leaves the completed status and results intact.
    pub fn complete(&self, id: Uuid, export_outcome: std::result::Result<PathBuf, String>) {
        self.with_task(id, |task| {
            task.status = TaskStatus::Completed;
            task.completed_at = Some(chrono::Utc::now());
            update_progress(task);
            match export_outcome {
                Ok(path) => task.result_path = Some(path),
                Err(message) => task.error = Some(message),
            }
        });
    }

    fn with_task(&self, id: Uuid, mutate: impl FnOnce(&mut Task)) {
        if let Some(mut task) = self.tasks.get_mut(&id) {
            mutate(&mut task);
        }
    }

    fn evict_completed(&self) {
        let mut order = self.order.lock();
        while self.tasks.len() > self.max_retained {
            let Some(pos) = order.iter().position(|id| {
                self.tasks
                    .get(id)
                    .map(|t| t.is_completed())
                    .unwrap_or(true)
            }) else {
                break;
            };
            let id = order.remove(pos).expect("position is in range");
            if self.tasks.remove(&id).is_some() {
                tracing::debug!(task_id = %id, "Evicted completed task past retention cap");
            }
        }
    }
}

fn update_progress(task: &mut Task) {
    task.progress = if task.total_files == 0 {
        100.0
    } else {
        task.processed as f64 / task.total_files as f64 * 100.0
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_task() -> Task {
        let mut task = Task::new(1);
        task.status = TaskStatus::Completed;
        task
    }

    #[test]
    fn unknown_id_is_task_not_found() {
        let store = TaskStore::new(8);
        let id = Uuid::new_v4();
        assert!(matches!(store.get(id), Err(Error::TaskNotFound(e)) if e == id));
    }

    #[test]
    fn counters_track_attempts_and_failures() {
        let store = TaskStore::new(8);
        let task = Task::new(4);
        let id = task.id;
        store.insert(task);
        store.mark_processing(id);

        store.record_failure(id);
        let snap = store.get(id).unwrap();
        assert_eq!((snap.processed, snap.failed), (1, 1));
        assert_eq!(snap.progress, 25.0);
        assert!(snap.failed <= snap.processed && snap.processed <= snap.total_files);

        store.record_failure(id);
        store.record_failure(id);
        store.record_failure(id);
        let snap = store.get(id).unwrap();
        assert_eq!((snap.processed, snap.failed), (4, 4));
        assert_eq!(snap.progress, 100.0);
        assert_eq!(snap.status, TaskStatus::Processing);
    }

    #[test]
    fn progress_is_monotonic_over_attempts() {
        let store = TaskStore::new(8);
        let task = Task::new(3);
        let id = task.id;
        store.insert(task);

        let mut last = store.get(id).unwrap().progress;
        for _ in 0..3 {
            store.record_failure(id);
            let progress = store.get(id).unwrap().progress;
            assert!(progress >= last);
            last = progress;
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn export_failure_keeps_completed_status_and_results() {
        let store = TaskStore::new(8);
        let task = Task::new(1);
        let id = task.id;
        store.insert(task);
        store.complete(id, Err("failed to export results: disk full".to_string()));

        let snap = store.get(id).unwrap();
        assert_eq!(snap.status, TaskStatus::Completed);
        assert!(snap.result_path.is_none());
        assert_eq!(
            snap.error.as_deref(),
            Some("failed to export results: disk full")
        );
        assert!(snap.completed_at.is_some());
    }

    #[test]
    fn eviction_drops_oldest_completed_only() {
        let store = TaskStore::new(2);

        let oldest = completed_task();
        let oldest_id = oldest.id;
        store.insert(oldest);

        let running = Task::new(1);
        let running_id = running.id;
        store.insert(running);

        let newest = completed_task();
        let newest_id = newest.id;
        store.insert(newest);

        assert_eq!(store.len(), 2);
        assert!(store.get(oldest_id).is_err());
        assert!(store.get(running_id).is_ok());
        assert!(store.get(newest_id).is_ok());
    }

    #[test]
    fn running_tasks_survive_the_cap() {
        let store = TaskStore::new(1);
        let a = Task::new(1);
        let a_id = a.id;
        let b = Task::new(1);
        let b_id = b.id;
        store.insert(a);
        store.insert(b);

        // both still pending; nothing is evictable
        assert_eq!(store.len(), 2);
        assert!(store.get(a_id).is_ok());
        assert!(store.get(b_id).is_ok());
    }

    #[test]
    fn remove_deletes_the_entry() {
        let store = TaskStore::new(8);
        let task = completed_task();
        let id = task.id;
        store.insert(task);

        store.remove(id).unwrap();
        assert!(store.is_empty());
        assert!(matches!(store.remove(id), Err(Error::TaskNotFound(_))));
    }
}
