//! Field-level validation failures collected before a request reaches a port.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;

/// Message used when a required field is absent from the payload.
pub const REQUIRED: &str = "This field is required.";

/// Ordered map of field name to the messages explaining why it was rejected.
///
/// Serialises as `{ "<field>": ["message", ...] }`.
///
/// # Examples
/// ```
/// use backend::domain::FieldErrors;
///
/// let mut errors = FieldErrors::default();
/// assert!(errors.is_empty());
/// errors.push("email", "Enter a valid email address.");
/// assert_eq!(errors.messages("email"), ["Enter a valid email address."]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Record a message against `field`.
    pub fn push(&mut self, field: impl Into<String>, message: impl Display) {
        self.0
            .entry(field.into())
            .or_default()
            .push(message.to_string());
    }

    /// Record the standard "required" message against `field`.
    pub fn required(&mut self, field: impl Into<String>) {
        self.push(field, REQUIRED);
    }

    /// Keep the value of `result`, recording its error against `field`.
    ///
    /// Lets callers validate every field of a payload in one pass.
    pub fn check<T, E: Display>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(field, err);
                None
            }
        }
    }

    /// Messages recorded against `field`.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether no field has been rejected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}
