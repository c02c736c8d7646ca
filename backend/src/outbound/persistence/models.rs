//! Diesel row structs for the users, lists and tasks tables.
//!
//! Rows never leave the persistence module; repositories convert them to
//! domain types through the `into_*` helpers, which re-validate stored
//! values so a corrupt row surfaces as a query error instead of a panic.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    DisplayName, EmailAddress, ItemDetails, ItemName, ListId, PasswordHash, Priority, Status,
    StoredUser, Task, TaskId, TaskList, User, UserId,
};

use super::schema::{lists, tasks, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, String> {
        self.into_stored().map(|stored| stored.user)
    }

    pub(crate) fn into_stored(self) -> Result<StoredUser, String> {
        let email = EmailAddress::new(&self.email).map_err(|err| err.to_string())?;
        let display_name = DisplayName::new(&self.display_name).map_err(|err| err.to_string())?;
        Ok(StoredUser {
            user: User::new(
                UserId::new(self.id),
                email,
                display_name,
                self.date_joined,
            ),
            password_hash: PasswordHash::new(self.password_hash),
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub display_name: &'a str,
    pub password_hash: &'a str,
    pub date_joined: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ListRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListRow {
    pub(crate) fn into_list(self) -> Result<TaskList, String> {
        let details = details_from_columns(self.name, self.description, &self.priority, &self.status)?;
        Ok(TaskList::from_parts(
            ListId::new(self.id),
            UserId::new(self.user_id),
            details,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lists)]
pub(crate) struct NewListRow<'a> {
    pub user_id: i64,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub priority: &'a str,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the mutable list columns.
///
/// `description` is written even when `None` so clearing it sticks.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = lists)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ListUpdate<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub priority: &'a str,
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub id: i64,
    pub list_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskRow {
    pub(crate) fn into_task(self) -> Result<Task, String> {
        let details = details_from_columns(self.name, self.description, &self.priority, &self.status)?;
        Ok(Task::from_parts(
            TaskId::new(self.id),
            ListId::new(self.list_id),
            details,
            self.is_complete,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow<'a> {
    pub list_id: i64,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub priority: &'a str,
    pub status: &'a str,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TaskUpdate<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub priority: &'a str,
    pub status: &'a str,
    pub is_complete: bool,
    pub updated_at: DateTime<Utc>,
}

fn details_from_columns(
    name: String,
    description: Option<String>,
    priority: &str,
    status: &str,
) -> Result<ItemDetails, String> {
    Ok(ItemDetails {
        name: ItemName::new(name).map_err(|err| err.to_string())?,
        description,
        priority: priority.parse::<Priority>().map_err(|err| err.to_string())?,
        status: status.parse::<Status>().map_err(|err| err.to_string())?,
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion.
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn list_row(at: DateTime<Utc>, priority: &str) -> ListRow {
        ListRow {
            id: 7,
            user_id: 2,
            name: "Groceries".into(),
            description: None,
            priority: priority.into(),
            status: "in-progress".into(),
            created_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    fn list_row_converts_choices(at: DateTime<Utc>) {
        let list = list_row(at, "high").into_list().expect("valid row");

        assert_eq!(list.id(), ListId::new(7));
        assert_eq!(list.owner(), UserId::new(2));
        assert_eq!(list.details().priority, Priority::High);
        assert_eq!(list.details().status, Status::InProgress);
    }

    #[rstest]
    fn unknown_stored_choice_is_reported(at: DateTime<Utc>) {
        let err = list_row(at, "urgent").into_list().expect_err("bad priority");
        assert!(err.contains("urgent"));
    }

    #[rstest]
    fn user_row_keeps_password_hash(at: DateTime<Utc>) {
        let stored = UserRow {
            id: 1,
            email: "a@x.com".into(),
            display_name: "Ada".into(),
            password_hash: "$argon2id$stub".into(),
            date_joined: at,
        }
        .into_stored()
        .expect("valid row");

        assert_eq!(stored.user.email().as_ref(), "a@x.com");
        assert_eq!(stored.password_hash.as_str(), "$argon2id$stub");
    }
}
