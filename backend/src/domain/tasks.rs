//! Tasks belonging to a list.

use std::fmt;

use chrono::{DateTime, Utc};

use super::details::{DetailsInput, ItemChanges, ItemDetails};
use super::fields::advance_timestamp;
use super::lists::ListId;
use super::validation::FieldErrors;

/// Database-assigned task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(i64);

impl TaskId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single item of work inside a [`TaskList`](super::TaskList).
///
/// ## Invariants
/// - `list_id` never changes after creation.
/// - `is_complete` is independent of `details.status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    list_id: ListId,
    details: ItemDetails,
    is_complete: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Rebuild a task from stored values.
    pub fn from_parts(
        id: TaskId,
        list_id: ListId,
        details: ItemDetails,
        is_complete: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            list_id,
            details,
            is_complete,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn list_id(&self) -> ListId {
        self.list_id
    }

    pub fn details(&self) -> &ItemDetails {
        &self.details
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply `changes` and refresh the update timestamp.
    pub fn apply(mut self, changes: TaskChanges, now: DateTime<Utc>) -> Self {
        self.details.apply(changes.details);
        if let Some(is_complete) = changes.is_complete {
            self.is_complete = is_complete;
        }
        self.updated_at = advance_timestamp(self.updated_at, now);
        self
    }
}

/// Raw task payload: the shared descriptive fields plus the completion flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub details: DetailsInput,
    pub is_complete: Option<bool>,
}

/// Validated payload for creating or replacing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub details: ItemDetails,
    pub is_complete: bool,
}

impl TaskDraft {
    /// Validate a complete task payload; `isComplete` defaults to false.
    pub fn try_from_input(input: TaskInput) -> Result<Self, FieldErrors> {
        let TaskInput {
            details,
            is_complete,
        } = input;
        ItemDetails::try_from_input(details).map(|details| Self {
            details,
            is_complete: is_complete.unwrap_or(false),
        })
    }
}

/// Validated task update; PUT payloads convert from [`TaskDraft`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub details: ItemChanges,
    pub is_complete: Option<bool>,
}

impl TaskChanges {
    pub fn try_from_input(input: TaskInput) -> Result<Self, FieldErrors> {
        let TaskInput {
            details,
            is_complete,
        } = input;
        ItemChanges::try_from_input(details).map(|details| Self {
            details,
            is_complete,
        })
    }
}

impl From<TaskDraft> for TaskChanges {
    fn from(value: TaskDraft) -> Self {
        Self {
            details: value.details.into(),
            is_complete: Some(value.is_complete),
        }
    }
}

/// Task row about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub list_id: ListId,
    pub details: ItemDetails,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
}
