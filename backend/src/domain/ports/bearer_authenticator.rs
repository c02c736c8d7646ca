//! Driving port resolving a bearer access token to a user identity.

use crate::domain::{Error, UserId};

/// Stateless access-token verification used by protected endpoints.
#[cfg_attr(test, mockall::automock)]
pub trait BearerAuthenticator: Send + Sync {
    /// Resolve `token` to its subject or fail with an unauthorized error.
    fn authenticate(&self, token: &str) -> Result<UserId, Error>;
}
