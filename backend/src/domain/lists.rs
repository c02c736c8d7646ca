//! Task lists owned by a single user.

use std::fmt;

use chrono::{DateTime, Utc};

use super::details::{DetailsInput, ItemChanges, ItemDetails};
use super::fields::advance_timestamp;
use super::user::UserId;
use super::validation::FieldErrors;

/// Database-assigned list identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListId(i64);

impl ListId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named collection of tasks.
///
/// ## Invariants
/// - `owner` never changes after creation.
/// - `updated_at >= created_at`, strictly increasing across mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    id: ListId,
    owner: UserId,
    details: ItemDetails,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskList {
    /// Rebuild a list from stored values.
    pub fn from_parts(
        id: ListId,
        owner: UserId,
        details: ItemDetails,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            details,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> ListId {
        self.id
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn details(&self) -> &ItemDetails {
        &self.details
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply `changes` and refresh the update timestamp.
    pub fn apply(mut self, changes: ListChanges, now: DateTime<Utc>) -> Self {
        self.details.apply(changes.0);
        self.updated_at = advance_timestamp(self.updated_at, now);
        self
    }
}

/// Validated payload for creating or replacing a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDraft(pub ItemDetails);

impl ListDraft {
    pub fn try_from_input(input: DetailsInput) -> Result<Self, FieldErrors> {
        ItemDetails::try_from_input(input).map(Self)
    }
}

/// Validated list update; PUT payloads convert from [`ListDraft`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListChanges(pub ItemChanges);

impl ListChanges {
    pub fn try_from_input(input: DetailsInput) -> Result<Self, FieldErrors> {
        ItemChanges::try_from_input(input).map(Self)
    }
}

impl From<ListDraft> for ListChanges {
    fn from(value: ListDraft) -> Self {
        Self(value.0.into())
    }
}

/// List row about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewList {
    pub owner: UserId,
    pub details: ItemDetails,
    pub created_at: DateTime<Utc>,
}
