//! HTTP server configuration object.

use std::net::SocketAddr;

use backend::domain::OwnershipPolicy;
use backend::inbound::http::refresh_cookie::RefreshCookiePolicy;
use backend::outbound::persistence::DbPool;
use backend::outbound::security::TokenLifetimes;

use super::signing_secret::SigningSecret;

/// Everything [`super::create_server`] needs to wire adapters and bind.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) secret: SigningSecret,
    pub(crate) lifetimes: TokenLifetimes,
    pub(crate) cookie_secure: bool,
    pub(crate) ownership: OwnershipPolicy,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        db_pool: DbPool,
        secret: SigningSecret,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            bind_addr,
            db_pool,
            secret,
            lifetimes,
            cookie_secure: true,
            ownership: OwnershipPolicy::RevealForbidden,
        }
    }

    /// Only disable for plain-HTTP local development.
    #[must_use]
    pub fn with_cookie_secure(mut self, cookie_secure: bool) -> Self {
        self.cookie_secure = cookie_secure;
        self
    }

    #[must_use]
    pub fn with_ownership_policy(mut self, ownership: OwnershipPolicy) -> Self {
        self.ownership = ownership;
        self
    }

    /// Refresh cookie attributes; the cookie lives as long as the token.
    pub(crate) fn refresh_cookie(&self) -> RefreshCookiePolicy {
        RefreshCookiePolicy::new(self.cookie_secure, self.lifetimes.refresh)
    }
}
