//! List and task service implementing the command/query driving ports.
//!
//! Every operation on an existing list, and every task operation, resolves
//! the list through the [`OwnershipGuard`] before touching storage.
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::fields::storage_timestamp;
use crate::domain::ports::{
    CreateListRequest, CreateTaskRequest, DeleteListRequest, DeleteTaskRequest, GetListRequest,
    GetTaskRequest, ListCommand, ListListsRequest, ListQuery, ListRepository, ListSlice,
    ListTasksRequest, TaskCommand, TaskQuery, TaskRepository, UpdateListRequest,
    UpdateTaskRequest,
};
use crate::domain::repository_error_mapping::{
    map_list_repository_error, map_task_repository_error,
};
use crate::domain::{
    Error, ListId, NewList, NewTask, OwnershipGuard, Task, TaskId, TaskList, UserId,
};

/// Service owning list and task use-cases.
#[derive(Clone)]
pub struct TaskListService<L, T> {
    lists: Arc<L>,
    tasks: Arc<T>,
    guard: OwnershipGuard,
    clock: Arc<dyn Clock>,
}

impl<L, T> TaskListService<L, T> {
    pub fn new(
        lists: Arc<L>,
        tasks: Arc<T>,
        guard: OwnershipGuard,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            lists,
            tasks,
            guard,
            clock,
        }
    }
}

impl<L, T> TaskListService<L, T>
where
    L: ListRepository,
    T: TaskRepository,
{
    async fn owned_list(&self, list_id: ListId, caller: UserId) -> Result<TaskList, Error> {
        let found = self
            .lists
            .find_by_id(list_id)
            .await
            .map_err(map_list_repository_error)?;
        self.guard.owned_list(found, caller)
    }

    async fn owned_task(
        &self,
        list_id: ListId,
        task_id: TaskId,
        caller: UserId,
    ) -> Result<Task, Error> {
        let list = self.owned_list(list_id, caller).await?;
        self.tasks
            .find_in_list(list.id(), task_id)
            .await
            .map_err(map_task_repository_error)?
            .ok_or_else(|| Error::not_found("task not found"))
    }
}

#[async_trait]
impl<L, T> ListCommand for TaskListService<L, T>
where
    L: ListRepository,
    T: TaskRepository,
{
    async fn create_list(&self, request: CreateListRequest) -> Result<TaskList, Error> {
        let new_list = NewList {
            owner: request.owner,
            details: request.draft.0,
            created_at: storage_timestamp(self.clock.utc()),
        };
        let list = self
            .lists
            .insert(&new_list)
            .await
            .map_err(map_list_repository_error)?;
        debug!(list_id = %list.id(), owner = %list.owner(), "created list");
        Ok(list)
    }

    async fn update_list(&self, request: UpdateListRequest) -> Result<TaskList, Error> {
        let UpdateListRequest {
            caller,
            list_id,
            changes,
        } = request;
        let list = self.owned_list(list_id, caller).await?;
        let updated = list.apply(changes, self.clock.utc());
        let saved = self
            .lists
            .save(&updated)
            .await
            .map_err(map_list_repository_error)?;
        if !saved {
            return Err(Error::not_found("list not found"));
        }
        Ok(updated)
    }

    async fn delete_list(&self, request: DeleteListRequest) -> Result<(), Error> {
        let list = self.owned_list(request.list_id, request.caller).await?;
        let deleted = self
            .lists
            .delete(list.id())
            .await
            .map_err(map_list_repository_error)?;
        if !deleted {
            return Err(Error::not_found("list not found"));
        }
        debug!(list_id = %list.id(), "deleted list and its tasks");
        Ok(())
    }
}

#[async_trait]
impl<L, T> ListQuery for TaskListService<L, T>
where
    L: ListRepository,
    T: TaskRepository,
{
    async fn list_lists(&self, request: ListListsRequest) -> Result<ListSlice, Error> {
        self.lists
            .list_for_owner(request.owner, request.page)
            .await
            .map_err(map_list_repository_error)
    }

    async fn get_list(&self, request: GetListRequest) -> Result<TaskList, Error> {
        self.owned_list(request.list_id, request.caller).await
    }
}

#[async_trait]
impl<L, T> TaskCommand for TaskListService<L, T>
where
    L: ListRepository,
    T: TaskRepository,
{
    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, Error> {
        let CreateTaskRequest {
            caller,
            list_id,
            draft,
        } = request;
        let list = self.owned_list(list_id, caller).await?;
        let new_task = NewTask {
            list_id: list.id(),
            details: draft.details,
            is_complete: draft.is_complete,
            created_at: storage_timestamp(self.clock.utc()),
        };
        let task = self
            .tasks
            .insert(&new_task)
            .await
            .map_err(map_task_repository_error)?;
        debug!(list_id = %list.id(), task_id = %task.id(), "created task");
        Ok(task)
    }

    async fn update_task(&self, request: UpdateTaskRequest) -> Result<Task, Error> {
        let UpdateTaskRequest {
            caller,
            list_id,
            task_id,
            changes,
        } = request;
        let task = self.owned_task(list_id, task_id, caller).await?;
        let updated = task.apply(changes, self.clock.utc());
        let saved = self
            .tasks
            .save(&updated)
            .await
            .map_err(map_task_repository_error)?;
        if !saved {
            return Err(Error::not_found("task not found"));
        }
        Ok(updated)
    }

    async fn delete_task(&self, request: DeleteTaskRequest) -> Result<(), Error> {
        let task = self
            .owned_task(request.list_id, request.task_id, request.caller)
            .await?;
        let deleted = self
            .tasks
            .delete(task.list_id(), task.id())
            .await
            .map_err(map_task_repository_error)?;
        if !deleted {
            return Err(Error::not_found("task not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl<L, T> TaskQuery for TaskListService<L, T>
where
    L: ListRepository,
    T: TaskRepository,
{
    async fn list_tasks(&self, request: ListTasksRequest) -> Result<Vec<Task>, Error> {
        let list = self.owned_list(request.list_id, request.caller).await?;
        self.tasks
            .list_for_list(list.id())
            .await
            .map_err(map_task_repository_error)
    }

    async fn get_task(&self, request: GetTaskRequest) -> Result<Task, Error> {
        self.owned_task(request.list_id, request.task_id, request.caller)
            .await
    }
}

#[cfg(test)]
#[path = "task_list_service_tests.rs"]
mod tests;
