//! Driving port for account mutations: registration and token issuance.
//!
//! Inbound adapters call this port without knowing how credentials are
//! stored or how tokens are signed.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, RegisteredAccount, Registration, TokenPair};

/// Account use-cases that issue tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create a user and issue its first token pair.
    ///
    /// Fails with [`ErrorCode::Conflict`](crate::domain::ErrorCode::Conflict)
    /// when the email is already registered.
    async fn register(&self, registration: Registration) -> Result<RegisteredAccount, Error>;

    /// Exchange email and password for a token pair.
    ///
    /// Unknown emails and wrong passwords are indistinguishable.
    async fn login(&self, credentials: LoginCredentials) -> Result<TokenPair, Error>;

    /// Exchange a refresh token for a new access token and a rotated
    /// refresh token. `None` means the caller presented no token.
    async fn refresh(&self, refresh_token: Option<String>) -> Result<TokenPair, Error>;
}
