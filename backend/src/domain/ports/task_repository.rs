//! Port for task persistence.

use async_trait::async_trait;

use crate::domain::{ListId, NewTask, Task, TaskId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by task repository adapters.
    pub enum TaskRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "task repository query failed: {message}",
        /// The parent list was deleted before the task was written.
        MissingList { list_id: i64 } => "list {list_id} no longer exists",
    }
}

/// Port for task persistence. Every lookup is scoped to the parent list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a task and return it with its assigned identifier.
    async fn insert(&self, task: &NewTask) -> Result<Task, TaskRepositoryError>;

    /// Find a task by id under `list_id`. Tasks of other lists are `None`.
    async fn find_in_list(
        &self,
        list_id: ListId,
        task_id: TaskId,
    ) -> Result<Option<Task>, TaskRepositoryError>;

    /// Every task under `list_id`, oldest first.
    async fn list_for_list(&self, list_id: ListId) -> Result<Vec<Task>, TaskRepositoryError>;

    /// Persist the mutable fields and update timestamp of an existing task.
    ///
    /// Returns `false` when the task no longer exists.
    async fn save(&self, task: &Task) -> Result<bool, TaskRepositoryError>;

    /// Delete a task scoped to `list_id`; `false` when nothing matched.
    async fn delete(&self, list_id: ListId, task_id: TaskId) -> Result<bool, TaskRepositoryError>;
}
