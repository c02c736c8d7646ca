//! In-memory implementations of the driven repository ports.
//!
//! One store backs all three repositories so deleting a list removes its
//! tasks, as the foreign key cascade does in PostgreSQL.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use pagination::PageRequest;

use backend::domain::ports::{
    ListRepository, ListRepositoryError, ListSlice, TaskRepository, TaskRepositoryError,
    UserPersistenceError, UserRepository,
};
use backend::domain::{
    ListId, NewList, NewTask, NewUser, StoredUser, Task, TaskId, TaskList, User, UserId,
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, StoredUser>,
    lists: BTreeMap<i64, TaskList>,
    tasks: BTreeMap<i64, Task>,
    next_id: i64,
}

impl Tables {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared tables behind a mutex.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored tasks across every list.
    pub fn task_count(&self) -> usize {
        self.tables().tasks.len()
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<chrono::Utc>, i64)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut tables = self.tables();
        if tables
            .users
            .values()
            .any(|stored| stored.user.email() == &user.email)
        {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        let id = tables.allocate();
        let created = User::new(
            UserId::new(id),
            user.email.clone(),
            user.display_name.clone(),
            user.joined_at,
        );
        tables.users.insert(
            id,
            StoredUser {
                user: created.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, UserPersistenceError> {
        Ok(self
            .tables()
            .users
            .values()
            .find(|stored| stored.user.email().as_ref() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .tables()
            .users
            .get(&id.get())
            .map(|stored| stored.user.clone()))
    }
}

#[async_trait]
impl ListRepository for InMemoryStore {
    async fn insert(&self, list: &NewList) -> Result<TaskList, ListRepositoryError> {
        let mut tables = self.tables();
        let id = tables.allocate();
        let created = TaskList::from_parts(
            ListId::new(id),
            list.owner,
            list.details.clone(),
            list.created_at,
            list.created_at,
        );
        tables.lists.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: ListId) -> Result<Option<TaskList>, ListRepositoryError> {
        Ok(self.tables().lists.get(&id.get()).cloned())
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
        page: Option<PageRequest>,
    ) -> Result<ListSlice, ListRepositoryError> {
        let mut owned: Vec<TaskList> = self
            .tables()
            .lists
            .values()
            .filter(|list| list.owner() == owner)
            .cloned()
            .collect();
        newest_first(&mut owned, |list| (list.created_at(), list.id().get()));
        let total = owned.len() as u64;
        let lists = match page {
            Some(request) => owned
                .into_iter()
                .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
                .take(request.limit() as usize)
                .collect(),
            None => owned,
        };
        Ok(ListSlice { lists, total })
    }

    async fn save(&self, list: &TaskList) -> Result<bool, ListRepositoryError> {
        let mut tables = self.tables();
        let Some(stored) = tables.lists.get_mut(&list.id().get()) else {
            return Ok(false);
        };
        *stored = list.clone();
        Ok(true)
    }

    async fn delete(&self, id: ListId) -> Result<bool, ListRepositoryError> {
        let mut tables = self.tables();
        let removed = tables.lists.remove(&id.get()).is_some();
        tables.tasks.retain(|_, task| task.list_id() != id);
        Ok(removed)
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn insert(&self, task: &NewTask) -> Result<Task, TaskRepositoryError> {
        let mut tables = self.tables();
        if !tables.lists.contains_key(&task.list_id.get()) {
            return Err(TaskRepositoryError::missing_list(task.list_id.get()));
        }
        let id = tables.allocate();
        let created = Task::from_parts(
            TaskId::new(id),
            task.list_id,
            task.details.clone(),
            task.is_complete,
            task.created_at,
            task.created_at,
        );
        tables.tasks.insert(id, created.clone());
        Ok(created)
    }

    async fn find_in_list(
        &self,
        list_id: ListId,
        task_id: TaskId,
    ) -> Result<Option<Task>, TaskRepositoryError> {
        Ok(self
            .tables()
            .tasks
            .get(&task_id.get())
            .filter(|task| task.list_id() == list_id)
            .cloned())
    }

    async fn list_for_list(&self, list_id: ListId) -> Result<Vec<Task>, TaskRepositoryError> {
        let mut tasks: Vec<Task> = self
            .tables()
            .tasks
            .values()
            .filter(|task| task.list_id() == list_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.created_at(), task.id().get()));
        Ok(tasks)
    }

    async fn save(&self, task: &Task) -> Result<bool, TaskRepositoryError> {
        let mut tables = self.tables();
        let Some(stored) = tables.tasks.get_mut(&task.id().get()) else {
            return Ok(false);
        };
        *stored = task.clone();
        Ok(true)
    }

    async fn delete(&self, list_id: ListId, task_id: TaskId) -> Result<bool, TaskRepositoryError> {
        let mut tables = self.tables();
        let matches = tables
            .tasks
            .get(&task_id.get())
            .is_some_and(|task| task.list_id() == list_id);
        if matches {
            tables.tasks.remove(&task_id.get());
        }
        Ok(matches)
    }
}
