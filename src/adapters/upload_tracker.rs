use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::domain::models::upload::UploadTask;

/// In-memory registry of upload attempts, keyed by task id.
///
/// Each in-flight upload mutates only its own entry, so interleaved
/// completions never clash; the mutex just keeps the map itself coherent.
/// Dismissing a task only hides it from listings, it does not cancel a
/// transfer already in flight.
#[derive(Clone, Default)]
pub struct UploadTracker {
    tasks: Arc<Mutex<HashMap<String, UploadTask>>>,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pending attempt and returns its task id.
    pub fn register(&self, owner_id: Uuid, file_name: &str, byte_size: u64) -> String {
        let task = UploadTask::new(owner_id, file_name.to_string(), byte_size);
        let id = task.id.clone();
        self.tasks.lock().unwrap().insert(id.clone(), task);
        id
    }

    pub fn start(&self, task_id: &str) {
        if let Some(task) = self.tasks.lock().unwrap().get_mut(task_id) {
            task.start();
        }
    }

    pub fn record_progress(&self, task_id: &str, loaded: u64, total: u64) {
        if let Some(task) = self.tasks.lock().unwrap().get_mut(task_id) {
            task.record_progress(loaded, total);
        }
    }

    pub fn complete(&self, task_id: &str, storage_url: &str) {
        if let Some(task) = self.tasks.lock().unwrap().get_mut(task_id) {
            task.complete(storage_url.to_string());
        }
    }

    pub fn fail(&self, task_id: &str, reason: &str) {
        if let Some(task) = self.tasks.lock().unwrap().get_mut(task_id) {
            task.fail(reason.to_string());
        }
    }

    /// Snapshot of one owner's attempts, newest state included, no ordering
    /// guarantee across tasks.
    pub fn tasks_for(&self, owner_id: Uuid) -> Vec<UploadTask> {
        self.tasks
            .lock()
            .unwrap()
            .values()
            .filter(|task| task.owner_id == owner_id)
            .cloned()
            .collect()
    }

    pub fn get(&self, owner_id: Uuid, task_id: &str) -> Option<UploadTask> {
        self.tasks
            .lock()
            .unwrap()
            .get(task_id)
            .filter(|task| task.owner_id == owner_id)
            .cloned()
    }

    pub fn dismiss(&self, owner_id: Uuid, task_id: &str) -> bool {
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.get(task_id) {
            Some(task) if task.owner_id == owner_id => {
                tasks.remove(task_id);
                true
            }
            _ => false,
        }
    }
}
