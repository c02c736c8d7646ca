//! Shared request-parsing helpers for inbound HTTP adapters.

use pagination::{PageRequest, PaginationError};
use serde::{Deserialize, Deserializer};
use serde_json::json;

use crate::domain::{Error, FieldErrors, LoginCredentials};

/// Deserialise a present field as `Some`, so `null` becomes `Some(None)`.
///
/// Combine with `#[serde(default)]` to tell an absent field (`None`) from an
/// explicit `null`.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn invalid_page_error(err: &PaginationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.parameter(),
        "code": "invalid_page",
    }))
}

/// Validate optional `page`/`page_size` query values.
pub(crate) fn parse_page_request(
    page: Option<u32>,
    page_size: Option<u32>,
) -> Result<Option<PageRequest>, Error> {
    PageRequest::from_query(page, page_size).map_err(|err| invalid_page_error(&err))
}

/// Validate a login payload, reporting missing and blank fields together.
pub(crate) fn parse_login(
    email: Option<&str>,
    password: Option<&str>,
) -> Result<LoginCredentials, Error> {
    let mut errors = FieldErrors::default();
    if email.is_none() {
        errors.required("email");
    }
    if password.is_none() {
        errors.required("password");
    }
    let (Some(email), Some(password)) = (email, password) else {
        return Err(Error::validation(errors));
    };

    LoginCredentials::try_from_parts(email, password).map_err(|err| {
        errors.push(err.field(), &err);
        Error::validation(errors)
    })
}

/// Field-level messages attached to a validation error, for assertions.
#[cfg(test)]
pub(crate) fn field_messages(error: &Error, field: &str) -> Vec<String> {
    error
        .details()
        .and_then(|details| details.pointer(&format!("/fields/{field}")))
        .and_then(|messages| serde_json::from_value(messages.clone()).ok())
        .unwrap_or_default()
}
