//! Field types shared by lists and tasks.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, DurationRound, TimeDelta, Utc};

/// Maximum allowed length for a list or task name.
pub const NAME_MAX: usize = 255;

/// Validation errors for [`ItemName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    Empty,
    TooLong { max: usize },
}

impl fmt::Display for NameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "This field may not be blank."),
            Self::TooLong { max } => {
                write!(f, "Ensure this field has no more than {max} characters.")
            }
        }
    }
}

impl std::error::Error for NameValidationError {}

/// Name of a list or task.
///
/// ## Invariants
/// - Trimmed, non-empty and at most [`NAME_MAX`] characters.
///
/// # Examples
/// ```
/// use backend::domain::ItemName;
///
/// let name = ItemName::new("  Groceries ").unwrap();
/// assert_eq!(name.as_ref(), "Groceries");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, NameValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(NameValidationError::Empty);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(NameValidationError::TooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Normalise an optional description: blank text is stored as absent.
pub fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.trim().is_empty())
}

/// Parse error for [`Priority`] and [`Status`].
///
/// Renders like a rejected choice so it can be reported per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChoiceError {
    pub input: String,
}

impl fmt::Display for ParseChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" is not a valid choice.", self.input)
    }
}

impl std::error::Error for ParseChoiceError {}

/// Relative importance of a list or task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseChoiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseChoiceError {
                input: value.to_owned(),
            }),
        }
    }
}

/// Progress of a list or task. Any state may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    InProgress,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseChoiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "not-started" => Ok(Self::NotStarted),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseChoiceError {
                input: value.to_owned(),
            }),
        }
    }
}

/// Timestamp for a mutation of a record last touched at `previous`.
///
/// Storage keeps microsecond precision, so `now` is truncated to whole
/// microseconds and forced strictly past `previous`.
pub fn advance_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let micro = TimeDelta::microseconds(1);
    let now = now.duration_trunc(micro).unwrap_or(now);
    if now > previous { now } else { previous + micro }
}

/// `now` truncated to the precision storage keeps.
pub fn storage_timestamp(now: DateTime<Utc>) -> DateTime<Utc> {
    now.duration_trunc(TimeDelta::microseconds(1)).unwrap_or(now)
}
