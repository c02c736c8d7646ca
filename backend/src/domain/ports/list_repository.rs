//! Port for list persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{ListId, NewList, TaskList, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by list repository adapters.
    pub enum ListRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "list repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "list repository query failed: {message}",
    }
}

/// One slice of an owner's lists plus the size of the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSlice {
    pub lists: Vec<TaskList>,
    pub total: u64,
}

/// Port for list persistence and lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Insert a list and return it with its assigned identifier.
    async fn insert(&self, list: &NewList) -> Result<TaskList, ListRepositoryError>;

    /// Find a list by id regardless of owner.
    async fn find_by_id(&self, id: ListId) -> Result<Option<TaskList>, ListRepositoryError>;

    /// Lists owned by `owner`, newest first (ties broken by id descending).
    ///
    /// `page` of `None` returns every list.
    async fn list_for_owner(
        &self,
        owner: UserId,
        page: Option<PageRequest>,
    ) -> Result<ListSlice, ListRepositoryError>;

    /// Persist the mutable fields and update timestamp of an existing list.
    ///
    /// Returns `false` when the list no longer exists.
    async fn save(&self, list: &TaskList) -> Result<bool, ListRepositoryError>;

    /// Delete a list together with its tasks.
    ///
    /// Returns `true` when a row was deleted and `false` when the list did
    /// not exist.
    async fn delete(&self, id: ListId) -> Result<bool, ListRepositoryError>;
}
