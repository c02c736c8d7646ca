//! Domain primitives, ports and services.
//!
//! Purpose: define the strongly typed users, lists and tasks the API works
//! with, the error taxonomy adapters translate, and the services that
//! implement every use-case against the driven ports.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `User`, `TaskList`, `Task` and their identifier and field newtypes.
//! - `AccountService` and `TaskListService`: driving port implementations.
//! - `OwnershipGuard`: existence-then-ownership checks.

pub mod account_service;
pub mod auth;
pub mod authorization;
pub mod details;
pub mod error;
pub mod fields;
pub mod lists;
pub mod ports;
mod repository_error_mapping;
pub mod task_list_service;
pub mod tasks;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, ParseTokenKindError, PasswordHash,
    RegisteredAccount, Registration, TokenKind, TokenPair,
};
pub use self::authorization::{OwnershipGuard, OwnershipPolicy};
pub use self::details::{DetailsInput, ItemChanges, ItemDetails};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::fields::{
    ItemName, NAME_MAX, NameValidationError, ParseChoiceError, Priority, Status,
};
pub use self::lists::{ListChanges, ListDraft, ListId, NewList, TaskList};
pub use self::task_list_service::TaskListService;
pub use self::tasks::{NewTask, Task, TaskChanges, TaskDraft, TaskId, TaskInput};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DisplayName, EmailAddress, NewUser, StoredUser, User, UserId, UserValidationError,
};
pub use self::validation::FieldErrors;
