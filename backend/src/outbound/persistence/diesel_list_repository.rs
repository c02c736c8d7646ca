//! PostgreSQL-backed `ListRepository` implementation.
//!
//! Deleting a list relies on the `ON DELETE CASCADE` foreign key from
//! `tasks.list_id` to remove its tasks in the same statement.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;
use tracing::warn;

use crate::domain::ports::{ListRepository, ListRepositoryError, ListSlice};
use crate::domain::{ListId, NewList, TaskList, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ListRow, ListUpdate, NewListRow};
use super::pool::{DbPool, PoolError};
use super::schema::lists;

/// Diesel-backed implementation of the [`ListRepository`] port.
#[derive(Clone)]
pub struct DieselListRepository {
    pool: DbPool,
}

impl DieselListRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ListRepositoryError {
    map_basic_pool_error(error, ListRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ListRepositoryError {
    map_basic_diesel_error(
        error,
        ListRepositoryError::query,
        ListRepositoryError::connection,
    )
}

fn row_to_list(row: ListRow) -> Result<TaskList, ListRepositoryError> {
    let id = row.id;
    row.into_list().map_err(|reason| {
        warn!(list_id = id, %reason, "stored list row failed validation");
        ListRepositoryError::query("stored list is invalid")
    })
}

/// Clamp a pagination offset to the range PostgreSQL accepts.
fn sql_offset(page: PageRequest) -> i64 {
    i64::try_from(page.offset()).unwrap_or(i64::MAX)
}

#[async_trait]
impl ListRepository for DieselListRepository {
    async fn insert(&self, list: &NewList) -> Result<TaskList, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewListRow {
            user_id: list.owner.get(),
            name: list.details.name.as_ref(),
            description: list.details.description.as_deref(),
            priority: list.details.priority.as_str(),
            status: list.details.status.as_str(),
            created_at: list.created_at,
            updated_at: list.created_at,
        };

        let row: ListRow = diesel::insert_into(lists::table)
            .values(&new_row)
            .returning(ListRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_list(row)
    }

    async fn find_by_id(&self, id: ListId) -> Result<Option<TaskList>, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ListRow> = lists::table
            .find(id.get())
            .select(ListRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_list).transpose()
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
        page: Option<PageRequest>,
    ) -> Result<ListSlice, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let owned = lists::table.filter(lists::user_id.eq(owner.get()));
        let ordered = owned
            .order((lists::created_at.desc(), lists::id.desc()))
            .select(ListRow::as_select())
            .into_boxed();
        let query = match page {
            Some(page) => ordered
                .offset(sql_offset(page))
                .limit(i64::from(page.limit())),
            None => ordered,
        };

        let rows: Vec<ListRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        let total = match page {
            Some(_) => {
                let count: i64 = owned
                    .count()
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                u64::try_from(count).unwrap_or_default()
            }
            None => rows.len() as u64,
        };

        let lists = rows
            .into_iter()
            .map(row_to_list)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ListSlice { lists, total })
    }

    async fn save(&self, list: &TaskList) -> Result<bool, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let details = list.details();
        let changes = ListUpdate {
            name: details.name.as_ref(),
            description: details.description.as_deref(),
            priority: details.priority.as_str(),
            status: details.status.as_str(),
            updated_at: list.updated_at(),
        };

        let updated = diesel::update(lists::table.find(list.id().get()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete(&self, id: ListId) -> Result<bool, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(lists::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 10, 0)]
    #[case(3, 25, 50)]
    fn offset_follows_page_arithmetic(
        #[case] page: u32,
        #[case] page_size: u32,
        #[case] expected: i64,
    ) {
        let request = PageRequest::new(page, page_size).expect("valid page");
        assert_eq!(sql_offset(request), expected);
    }
}
