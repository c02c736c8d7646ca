//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hasher, token issuer) describe what the
//! domain needs from infrastructure. Driving ports (commands, queries,
//! authenticator) describe what inbound adapters may ask of the domain.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_query;
mod bearer_authenticator;
mod list_command;
mod list_query;
mod list_repository;
mod password_hasher;
mod task_command;
mod task_query;
mod task_repository;
mod token_issuer;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use account_query::MockAccountQuery;
pub use account_query::AccountQuery;
#[cfg(test)]
pub use bearer_authenticator::MockBearerAuthenticator;
pub use bearer_authenticator::BearerAuthenticator;
#[cfg(test)]
pub use list_command::MockListCommand;
pub use list_command::{CreateListRequest, DeleteListRequest, ListCommand, UpdateListRequest};
#[cfg(test)]
pub use list_query::MockListQuery;
pub use list_query::{GetListRequest, ListListsRequest, ListQuery};
#[cfg(test)]
pub use list_repository::MockListRepository;
pub use list_repository::{ListRepository, ListRepositoryError, ListSlice};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use task_command::MockTaskCommand;
pub use task_command::{CreateTaskRequest, DeleteTaskRequest, TaskCommand, UpdateTaskRequest};
#[cfg(test)]
pub use task_query::MockTaskQuery;
pub use task_query::{GetTaskRequest, ListTasksRequest, TaskQuery};
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskRepository, TaskRepositoryError};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
