//! Driving port for task reads.

use async_trait::async_trait;

use crate::domain::{Error, ListId, Task, TaskId, UserId};

/// Request to list every task of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTasksRequest {
    pub caller: UserId,
    pub list_id: ListId,
}

/// Request to fetch one task scoped to its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetTaskRequest {
    pub caller: UserId,
    pub list_id: ListId,
    pub task_id: TaskId,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskQuery: Send + Sync {
    /// Tasks of a list the caller owns, newest first.
    async fn list_tasks(&self, request: ListTasksRequest) -> Result<Vec<Task>, Error>;

    /// One task, after the ownership guard on its list.
    async fn get_task(&self, request: GetTaskRequest) -> Result<Task, Error>;
}
