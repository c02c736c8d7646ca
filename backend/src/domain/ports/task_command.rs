//! Driving port for task mutations.

use async_trait::async_trait;

use crate::domain::{Error, ListId, Task, TaskChanges, TaskDraft, TaskId, UserId};

/// Request to create a task under a list the caller owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub caller: UserId,
    pub list_id: ListId,
    pub draft: TaskDraft,
}

/// Request to replace or patch a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub caller: UserId,
    pub list_id: ListId,
    pub task_id: TaskId,
    pub changes: TaskChanges,
}

/// Request to delete one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTaskRequest {
    pub caller: UserId,
    pub list_id: ListId,
    pub task_id: TaskId,
}

/// Driving port for task mutation operations.
///
/// The ownership guard always runs against the parent list first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskCommand: Send + Sync {
    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, Error>;

    async fn update_task(&self, request: UpdateTaskRequest) -> Result<Task, Error>;

    async fn delete_task(&self, request: DeleteTaskRequest) -> Result<(), Error>;
}
