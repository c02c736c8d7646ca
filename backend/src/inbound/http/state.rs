//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see driving
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, AccountQuery, BearerAuthenticator, ListCommand, ListQuery, TaskCommand,
    TaskQuery,
};

use super::refresh_cookie::RefreshCookiePolicy;

/// Parameter object bundling every port implementation used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub accounts_query: Arc<dyn AccountQuery>,
    pub authenticator: Arc<dyn BearerAuthenticator>,
    pub lists: Arc<dyn ListCommand>,
    pub lists_query: Arc<dyn ListQuery>,
    pub tasks: Arc<dyn TaskCommand>,
    pub tasks_query: Arc<dyn TaskQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub accounts_query: Arc<dyn AccountQuery>,
    pub authenticator: Arc<dyn BearerAuthenticator>,
    pub lists: Arc<dyn ListCommand>,
    pub lists_query: Arc<dyn ListQuery>,
    pub tasks: Arc<dyn TaskCommand>,
    pub tasks_query: Arc<dyn TaskQuery>,
    pub refresh_cookie: RefreshCookiePolicy,
}

impl HttpState {
    /// Construct state from the port bundle and the refresh cookie policy.
    pub fn new(ports: HttpStatePorts, refresh_cookie: RefreshCookiePolicy) -> Self {
        let HttpStatePorts {
            accounts,
            accounts_query,
            authenticator,
            lists,
            lists_query,
            tasks,
            tasks_query,
        } = ports;
        Self {
            accounts,
            accounts_query,
            authenticator,
            lists,
            lists_query,
            tasks,
            tasks_query,
            refresh_cookie,
        }
    }
}
