//! Driving port for list reads.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, ListId, TaskList, UserId};

use super::list_repository::ListSlice;

/// Request to list the caller's lists, optionally one page at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListListsRequest {
    pub owner: UserId,
    pub page: Option<PageRequest>,
}

/// Request to fetch one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetListRequest {
    pub caller: UserId,
    pub list_id: ListId,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListQuery: Send + Sync {
    /// Lists owned by the caller, newest first.
    async fn list_lists(&self, request: ListListsRequest) -> Result<ListSlice, Error>;

    /// One list, after the ownership guard.
    async fn get_list(&self, request: GetListRequest) -> Result<TaskList, Error>;
}
