//! Descriptive fields carried by both lists and tasks, with full and
//! partial update forms.

use super::fields::{ItemName, Priority, Status, normalize_description};
use super::validation::FieldErrors;

/// Raw, unvalidated descriptive fields as received from a caller.
///
/// `description` distinguishes "absent" (`None`) from "explicitly null"
/// (`Some(None)`) so partial updates can clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsInput {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

/// Validated descriptive fields of a list or task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetails {
    pub name: ItemName,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
}

impl ItemDetails {
    /// Validate a complete set of fields. `name`, `priority` and `status`
    /// are required; a missing description is stored as absent.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{DetailsInput, ItemDetails, Priority};
    ///
    /// let details = ItemDetails::try_from_input(DetailsInput {
    ///     name: Some("Groceries".into()),
    ///     priority: Some("low".into()),
    ///     status: Some("not-started".into()),
    ///     ..DetailsInput::default()
    /// })
    /// .unwrap();
    /// assert_eq!(details.priority, Priority::Low);
    /// assert!(details.description.is_none());
    /// ```
    pub fn try_from_input(input: DetailsInput) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let details = Self::collect(input, &mut errors);
        match details {
            Some(details) if errors.is_empty() => Ok(details),
            _ => Err(errors),
        }
    }

    pub(crate) fn collect(input: DetailsInput, errors: &mut FieldErrors) -> Option<Self> {
        let DetailsInput {
            name,
            description,
            priority,
            status,
        } = input;

        let name = required(errors, "name", name, |raw| ItemName::new(raw));
        let priority = required(errors, "priority", priority, |raw| raw.parse::<Priority>());
        let status = required(errors, "status", status, |raw| raw.parse::<Status>());

        Some(Self {
            name: name?,
            description: normalize_description(description.flatten()),
            priority: priority?,
            status: status?,
        })
    }

    /// Overwrite the fields named in `changes`.
    pub fn apply(&mut self, changes: ItemChanges) {
        let ItemChanges {
            name,
            description,
            priority,
            status,
        } = changes;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(status) = status {
            self.status = status;
        }
    }
}

/// Validated partial update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    pub name: Option<ItemName>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl ItemChanges {
    /// Validate only the fields present in `input`.
    pub fn try_from_input(input: DetailsInput) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let changes = Self::collect(input, &mut errors);
        errors.into_result().map(|()| changes)
    }

    pub(crate) fn collect(input: DetailsInput, errors: &mut FieldErrors) -> Self {
        let DetailsInput {
            name,
            description,
            priority,
            status,
        } = input;

        Self {
            name: name.and_then(|raw| errors.check("name", ItemName::new(raw))),
            description: description.map(normalize_description),
            priority: priority.and_then(|raw| errors.check("priority", raw.parse())),
            status: status.and_then(|raw| errors.check("status", raw.parse())),
        }
    }

    /// Whether the update names no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }
}

impl From<ItemDetails> for ItemChanges {
    fn from(value: ItemDetails) -> Self {
        Self {
            name: Some(value.name),
            description: Some(value.description),
            priority: Some(value.priority),
            status: Some(value.status),
        }
    }
}

fn required<T, E, F>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    parse: F,
) -> Option<T>
where
    E: std::fmt::Display,
    F: FnOnce(&str) -> Result<T, E>,
{
    match value {
        Some(raw) => errors.check(field, parse(&raw)),
        None => {
            errors.required(field);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::validation::REQUIRED;
    use rstest::{fixture, rstest};

    #[fixture]
    fn groceries() -> ItemDetails {
        ItemDetails {
            name: ItemName::new("Groceries").expect("valid name"),
            description: Some("weekly shop".into()),
            priority: Priority::Low,
            status: Status::NotStarted,
        }
    }

    #[rstest]
    fn full_input_requires_core_fields() {
        let errors =
            ItemDetails::try_from_input(DetailsInput::default()).expect_err("missing fields");
        for field in ["name", "priority", "status"] {
            assert_eq!(errors.messages(field), [REQUIRED]);
        }
        assert!(errors.messages("description").is_empty());
    }

    #[rstest]
    fn full_input_reports_invalid_choices() {
        let errors = ItemDetails::try_from_input(DetailsInput {
            name: Some("Groceries".into()),
            priority: Some("urgent".into()),
            status: Some("done".into()),
            ..DetailsInput::default()
        })
        .expect_err("invalid choices");
        assert_eq!(errors.messages("priority"), ["\"urgent\" is not a valid choice."]);
        assert_eq!(errors.messages("status"), ["\"done\" is not a valid choice."]);
    }

    #[rstest]
    fn partial_input_validates_present_fields_only() {
        let changes = ItemChanges::try_from_input(DetailsInput {
            status: Some("completed".into()),
            ..DetailsInput::default()
        })
        .expect("valid patch");
        assert_eq!(changes.status, Some(Status::Completed));
        assert!(changes.name.is_none());

        let errors = ItemChanges::try_from_input(DetailsInput {
            name: Some("   ".into()),
            ..DetailsInput::default()
        })
        .expect_err("blank name");
        assert_eq!(errors.messages("name"), ["This field may not be blank."]);
    }

    #[rstest]
    fn apply_touches_only_named_fields(mut groceries: ItemDetails) {
        groceries.apply(ItemChanges {
            status: Some(Status::InProgress),
            ..ItemChanges::default()
        });
        assert_eq!(groceries.status, Status::InProgress);
        assert_eq!(groceries.priority, Priority::Low);
        assert_eq!(groceries.description.as_deref(), Some("weekly shop"));
    }

    #[rstest]
    fn explicit_null_clears_description(mut groceries: ItemDetails) {
        let changes = ItemChanges::try_from_input(DetailsInput {
            description: Some(None),
            ..DetailsInput::default()
        })
        .expect("valid patch");
        groceries.apply(changes);
        assert!(groceries.description.is_none());
    }

    #[rstest]
    fn replacement_without_description_clears_it(mut groceries: ItemDetails) {
        let replacement = ItemDetails::try_from_input(DetailsInput {
            name: Some("Hardware".into()),
            priority: Some("high".into()),
            status: Some("completed".into()),
            ..DetailsInput::default()
        })
        .expect("valid replacement");
        groceries.apply(replacement.into());
        assert_eq!(groceries.name.as_ref(), "Hardware");
        assert!(groceries.description.is_none());
    }
}
