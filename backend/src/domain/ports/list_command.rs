//! Driving port for list mutations.

use async_trait::async_trait;

use crate::domain::{Error, ListChanges, ListDraft, ListId, TaskList, UserId};

/// Request to create a list owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListRequest {
    pub owner: UserId,
    pub draft: ListDraft,
}

/// Request to replace or patch a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateListRequest {
    pub caller: UserId,
    pub list_id: ListId,
    pub changes: ListChanges,
}

/// Request to delete a list and its tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteListRequest {
    pub caller: UserId,
    pub list_id: ListId,
}

/// Driving port for list mutation operations.
///
/// Every operation other than creation applies the ownership guard.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListCommand: Send + Sync {
    async fn create_list(&self, request: CreateListRequest) -> Result<TaskList, Error>;

    async fn update_list(&self, request: UpdateListRequest) -> Result<TaskList, Error>;

    async fn delete_list(&self, request: DeleteListRequest) -> Result<(), Error>;
}
