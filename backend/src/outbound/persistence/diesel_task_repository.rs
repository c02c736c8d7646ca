//! PostgreSQL-backed `TaskRepository` implementation.
//!
//! Every statement filters on `list_id` as well as the task id so a task is
//! only ever reachable through its own list.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{TaskRepository, TaskRepositoryError};
use crate::domain::{ListId, NewTask, Task, TaskId};

use super::diesel_basic_error_mapping::{
    is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewTaskRow, TaskRow, TaskUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

/// Diesel-backed implementation of the [`TaskRepository`] port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TaskRepositoryError {
    map_basic_pool_error(error, TaskRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TaskRepositoryError {
    map_basic_diesel_error(
        error,
        TaskRepositoryError::query,
        TaskRepositoryError::connection,
    )
}

fn row_to_task(row: TaskRow) -> Result<Task, TaskRepositoryError> {
    let id = row.id;
    row.into_task().map_err(|reason| {
        warn!(task_id = id, %reason, "stored task row failed validation");
        TaskRepositoryError::query("stored task is invalid")
    })
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn insert(&self, task: &NewTask) -> Result<Task, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewTaskRow {
            list_id: task.list_id.get(),
            name: task.details.name.as_ref(),
            description: task.details.description.as_deref(),
            priority: task.details.priority.as_str(),
            status: task.details.status.as_str(),
            is_complete: task.is_complete,
            created_at: task.created_at,
            updated_at: task.created_at,
        };

        let row: TaskRow = diesel::insert_into(tasks::table)
            .values(&new_row)
            .returning(TaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                if is_foreign_key_violation(&error) {
                    TaskRepositoryError::missing_list(task.list_id.get())
                } else {
                    map_diesel_error(error)
                }
            })?;

        row_to_task(row)
    }

    async fn find_in_list(
        &self,
        list_id: ListId,
        task_id: TaskId,
    ) -> Result<Option<Task>, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TaskRow> = tasks::table
            .filter(tasks::id.eq(task_id.get()))
            .filter(tasks::list_id.eq(list_id.get()))
            .select(TaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_task).transpose()
    }

    async fn list_for_list(&self, list_id: ListId) -> Result<Vec<Task>, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TaskRow> = tasks::table
            .filter(tasks::list_id.eq(list_id.get()))
            .order((tasks::created_at.asc(), tasks::id.asc()))
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_task).collect()
    }

    async fn save(&self, task: &Task) -> Result<bool, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let details = task.details();
        let changes = TaskUpdate {
            name: details.name.as_ref(),
            description: details.description.as_deref(),
            priority: details.priority.as_str(),
            status: details.status.as_str(),
            is_complete: task.is_complete(),
            updated_at: task.updated_at(),
        };

        let updated = diesel::update(
            tasks::table
                .filter(tasks::id.eq(task.id().get()))
                .filter(tasks::list_id.eq(task.list_id().get())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete(&self, list_id: ListId, task_id: TaskId) -> Result<bool, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            tasks::table
                .filter(tasks::id.eq(task_id.get()))
                .filter(tasks::list_id.eq(list_id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
