//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::ports::{
    MockAccountCommand, MockAccountQuery, MockBearerAuthenticator, MockListCommand,
    MockListQuery, MockTaskCommand, MockTaskQuery,
};

use super::refresh_cookie::RefreshCookiePolicy;
use super::state::{HttpState, HttpStatePorts};

/// Mocked driving ports; set expectations before calling [`test_state`].
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountCommand,
    pub accounts_query: MockAccountQuery,
    pub authenticator: MockBearerAuthenticator,
    pub lists: MockListCommand,
    pub lists_query: MockListQuery,
    pub tasks: MockTaskCommand,
    pub tasks_query: MockTaskQuery,
}

impl MockPorts {
    /// Mocks whose authenticator accepts the token `"t"` as `user`.
    pub fn signed_in(user: i64) -> Self {
        let mut ports = Self::default();
        ports
            .authenticator
            .expect_authenticate()
            .withf(|token| token == "t")
            .returning(move |_| Ok(crate::domain::UserId::new(user)));
        ports
    }
}

/// Build handler state from mocks. The refresh cookie is not `Secure` so
/// test clients send it back over plain HTTP.
pub fn test_state(ports: MockPorts) -> HttpState {
    HttpState::new(
        HttpStatePorts {
            accounts: Arc::new(ports.accounts),
            accounts_query: Arc::new(ports.accounts_query),
            authenticator: Arc::new(ports.authenticator),
            lists: Arc::new(ports.lists),
            lists_query: Arc::new(ports.lists_query),
            tasks: Arc::new(ports.tasks),
            tasks_query: Arc::new(ports.tasks_query),
        },
        RefreshCookiePolicy::new(false, chrono::TimeDelta::days(7)),
    )
}

/// Fixed timestamp shared by handler tests.
pub fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
        .single()
        .expect("valid fixture timestamp")
}
