//! Task storage and lookup.
//! Tasks live in memory for the lifetime of the process and are never evicted.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use a2a_protocol::Task;

/// In-memory task store, shared across request handlers.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Arc<RwLock<HashMap<String, Task>>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a task, replacing any task with the same id.
    pub async fn insert(&self, task: Task) {
        let mut db = self.tasks.write().await;
        db.insert(task.id.clone(), task);
    }

    pub async fn get(&self, task_id: &str) -> Option<Task> {
        let db = self.tasks.read().await;
        db.get(task_id).cloned()
    }

    /// Mark a task canceled and return its updated state. Canceling twice
    /// is harmless: the task simply stays canceled.
    pub async fn cancel(&self, task_id: &str) -> Option<Task> {
        let mut db = self.tasks.write().await;
        let task = db.get_mut(task_id)?;
        task.cancel();
        Some(task.clone())
    }
}
