//! Wiring of persistence and security adapters into the HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;

use backend::domain::{AccountService, OwnershipGuard, TaskListService};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::persistence::{
    DieselListRepository, DieselTaskRepository, DieselUserRepository,
};
use backend::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};

use super::ServerConfig;

/// Build handler state backed by PostgreSQL, Argon2 and JWT.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock = Arc::new(DefaultClock);
    let pool = config.db_pool.clone();

    let tokens = Arc::new(JwtTokenIssuer::new(
        config.secret.as_bytes(),
        config.lifetimes,
        clock.clone(),
    ));
    let accounts = Arc::new(AccountService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
        tokens,
        clock.clone(),
    ));
    let task_lists = Arc::new(TaskListService::new(
        Arc::new(DieselListRepository::new(pool.clone())),
        Arc::new(DieselTaskRepository::new(pool)),
        OwnershipGuard::new(config.ownership),
        clock,
    ));

    HttpState::new(
        HttpStatePorts {
            accounts: accounts.clone(),
            accounts_query: accounts.clone(),
            authenticator: accounts,
            lists: task_lists.clone(),
            lists_query: task_lists.clone(),
            tasks: task_lists.clone(),
            tasks_query: task_lists,
        },
        config.refresh_cookie(),
    )
}
