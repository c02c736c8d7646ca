//! Request and response bodies shared by the account, list and task
//! handlers.
//!
//! Field names are camelCase on the wire. Request bodies keep every field
//! optional so validation can report all missing fields at once; unknown
//! fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DetailsInput, ItemDetails, Task, TaskInput, TaskList, User};

use super::validation::deserialize_some;

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Ada")]
    pub display_name: String,
    pub date_joined: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            email: user.email().to_string(),
            display_name: user.display_name().to_string(),
            date_joined: user.joined_at(),
        }
    }
}

/// Registration payload for `POST /api/register/`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "Ada")]
    pub display_name: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

/// Login payload for `POST /api/token/`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body returned by login and refresh. The refresh token travels in a
/// cookie only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}

/// Body returned by registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub access: String,
}

/// Descriptive fields accepted for lists; also the base of [`TaskBody`].
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListBody {
    #[schema(example = "Groceries")]
    pub name: Option<String>,
    /// `null` clears the description on PATCH.
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, example = "Weekly shop")]
    pub description: Option<Option<String>>,
    #[schema(example = "low")]
    pub priority: Option<String>,
    #[schema(example = "not-started")]
    pub status: Option<String>,
}

impl From<ListBody> for DetailsInput {
    fn from(body: ListBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
            priority: body.priority,
            status: body.status,
        }
    }
}

/// Task payload: list fields plus the completion flag.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskBody {
    #[schema(example = "Milk")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[schema(example = "medium")]
    pub priority: Option<String>,
    #[schema(example = "not-started")]
    pub status: Option<String>,
    pub is_complete: Option<bool>,
}

impl From<TaskBody> for TaskInput {
    fn from(body: TaskBody) -> Self {
        Self {
            details: DetailsInput {
                name: body.name,
                description: body.description,
                priority: body.priority,
                status: body.status,
            },
            is_complete: body.is_complete,
        }
    }
}

/// A list as returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Groceries")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "low")]
    pub priority: String,
    #[schema(example = "not-started")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&TaskList> for ListResponse {
    fn from(list: &TaskList) -> Self {
        let ItemDetails {
            name,
            description,
            priority,
            status,
        } = list.details();
        Self {
            id: list.id().get(),
            name: name.to_string(),
            description: description.clone(),
            priority: priority.as_str().to_owned(),
            status: status.as_str().to_owned(),
            created_at: list.created_at(),
            updated_at: list.updated_at(),
        }
    }
}

/// A task as returned to the owner of its list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 1)]
    pub list_id: i64,
    #[schema(example = "Milk")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "medium")]
    pub priority: String,
    #[schema(example = "not-started")]
    pub status: String,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        let ItemDetails {
            name,
            description,
            priority,
            status,
        } = task.details();
        Self {
            id: task.id().get(),
            list_id: task.list_id().get(),
            name: name.to_string(),
            description: description.clone(),
            priority: priority.as_str().to_owned(),
            status: status.as_str().to_owned(),
            is_complete: task.is_complete(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}
