//! Translate driven-port failures into domain errors.
//!
//! Connectivity failures surface as `service_unavailable`; anything else
//! from storage is an internal error and is redacted at the HTTP edge.

use tracing::{debug, error};

use crate::domain::Error;
use crate::domain::ports::{
    ListRepositoryError, PasswordHashError, TaskRepositoryError, TokenError,
    UserPersistenceError,
};

pub(crate) fn map_user_repository_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::Connection { message } => {
            debug!(%message, "user repository unavailable");
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => {
            Error::conflict("a user with this email already exists")
        }
    }
}

pub(crate) fn map_list_repository_error(err: ListRepositoryError) -> Error {
    match err {
        ListRepositoryError::Connection { message } => {
            debug!(%message, "list repository unavailable");
            Error::service_unavailable(format!("list repository unavailable: {message}"))
        }
        ListRepositoryError::Query { message } => {
            error!(%message, "list repository query failed");
            Error::internal(format!("list repository error: {message}"))
        }
    }
}

pub(crate) fn map_task_repository_error(err: TaskRepositoryError) -> Error {
    match err {
        TaskRepositoryError::Connection { message } => {
            debug!(%message, "task repository unavailable");
            Error::service_unavailable(format!("task repository unavailable: {message}"))
        }
        TaskRepositoryError::Query { message } => {
            error!(%message, "task repository query failed");
            Error::internal(format!("task repository error: {message}"))
        }
        TaskRepositoryError::MissingList { list_id } => {
            debug!(list_id, "list deleted while writing a task");
            Error::not_found("list not found")
        }
    }
}

pub(crate) fn map_password_hash_error(err: PasswordHashError) -> Error {
    error!(error = %err, "password hashing failed");
    Error::internal(err.to_string())
}

/// Signing failures are internal; every verification failure is the same
/// unauthorized answer.
pub(crate) fn map_token_error(err: TokenError) -> Error {
    match err {
        TokenError::Signing { message } => {
            error!(%message, "token signing failed");
            Error::internal(format!("token signing failed: {message}"))
        }
        other => {
            debug!(error = %other, "token rejected");
            Error::unauthorized("token is invalid or expired")
        }
    }
}
