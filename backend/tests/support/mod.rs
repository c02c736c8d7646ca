//! Shared helpers for backend integration tests.
//!
//! Tests compile as separate crates under `backend/tests/`; this module
//! wires the real domain services, Argon2 and JWT adapters over the
//! in-memory store so the full router can be driven without a database.

#![allow(dead_code, reason = "each test crate uses a different subset")]

mod in_memory;

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use backend::domain::{AccountService, OwnershipGuard, OwnershipPolicy, TaskListService};
use backend::inbound::http::refresh_cookie::RefreshCookiePolicy;
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::security::{
    Argon2PasswordHasher, DEFAULT_ACCESS_TTL, DEFAULT_REFRESH_TTL, JwtTokenIssuer,
    TokenLifetimes,
};

pub use in_memory::InMemoryStore;

pub const SECRET: &[u8] = b"integration-test-signing-secret-0123456789";

/// Clock that tests move forward explicitly. Each reading also advances it
/// by one millisecond so consecutive writes get distinct timestamps.
pub struct SteppingClock(Mutex<DateTime<Utc>>);

impl SteppingClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::starting_at(
            Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
                .single()
                .expect("valid start time"),
        )
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut now = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        *now += TimeDelta::milliseconds(1);
        *now
    }
}

/// Handles kept by a test after building the state.
pub struct Harness {
    pub state: HttpState,
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<SteppingClock>,
}

/// Build HTTP state from real services over a fresh in-memory store.
pub fn harness(policy: OwnershipPolicy) -> Harness {
    let store = Arc::new(InMemoryStore::default());
    let clock = Arc::new(SteppingClock::default());
    let lifetimes = TokenLifetimes {
        access: DEFAULT_ACCESS_TTL,
        refresh: DEFAULT_REFRESH_TTL,
    };

    let tokens = Arc::new(JwtTokenIssuer::new(SECRET, lifetimes, clock.clone()));
    let accounts = Arc::new(AccountService::new(
        store.clone(),
        Arc::new(Argon2PasswordHasher::new()),
        tokens,
        clock.clone(),
    ));
    let task_lists = Arc::new(TaskListService::new(
        store.clone(),
        store.clone(),
        OwnershipGuard::new(policy),
        clock.clone(),
    ));

    let state = HttpState::new(
        HttpStatePorts {
            accounts: accounts.clone(),
            accounts_query: accounts.clone(),
            authenticator: accounts,
            lists: task_lists.clone(),
            lists_query: task_lists.clone(),
            tasks: task_lists.clone(),
            tasks_query: task_lists,
        },
        RefreshCookiePolicy::new(false, lifetimes.refresh),
    );

    Harness {
        state,
        store,
        clock,
    }
}

/// Initialise the full router, as served in production, around `state`.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .app_data(actix_web::web::Data::new(
                    backend::inbound::http::health::HealthState::new(),
                ))
                .wrap(backend::Trace)
                .configure(backend::inbound::http::configure),
        )
        .await
    };
}
