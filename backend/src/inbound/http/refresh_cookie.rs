//! Refresh-token cookie handling.
//!
//! The refresh token never appears in a JSON body. It travels in an
//! HTTP-only cookie scoped to the token endpoints; this policy turns a token
//! into a `Set-Cookie` directive and reads it back from requests.

use actix_web::HttpRequest;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use chrono::TimeDelta;

/// Cookie name carrying the refresh token.
pub const REFRESH_COOKIE_NAME: &str = "refresh_token";
/// Path the cookie is scoped to.
pub const REFRESH_COOKIE_PATH: &str = "/api/token/";

/// Attributes applied to every refresh cookie the service emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshCookiePolicy {
    secure: bool,
    max_age: TimeDelta,
}

impl RefreshCookiePolicy {
    /// `max_age` should match the refresh-token lifetime. `secure` is only
    /// disabled for plain-HTTP local development.
    pub const fn new(secure: bool, max_age: TimeDelta) -> Self {
        Self { secure, max_age }
    }

    fn base(&self, value: String) -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE_NAME, value)
            .path(REFRESH_COOKIE_PATH)
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::None)
            .finish()
    }

    /// Cookie delivering a freshly issued refresh token.
    pub fn issue(&self, refresh_token: &str) -> Cookie<'static> {
        let mut cookie = self.base(refresh_token.to_owned());
        cookie.set_max_age(Duration::seconds(self.max_age.num_seconds()));
        cookie
    }

    /// Expired cookie with the same name, path and attributes.
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = self.base(String::new());
        cookie.make_removal();
        cookie
    }

    /// Refresh token presented by the client, if any.
    pub fn read(&self, req: &HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_owned())
            .filter(|value| !value.is_empty())
    }
}

impl Default for RefreshCookiePolicy {
    fn default() -> Self {
        Self::new(true, TimeDelta::days(7))
    }
}
