//! Port for signing and verifying bearer and refresh tokens.

use crate::domain::{TokenKind, TokenPair, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token issuer adapters.
    pub enum TokenError {
        /// The token could not be decoded or its signature does not match.
        Malformed { message: String } => "token is malformed: {message}",
        /// The token expiry lies in the past.
        Expired => "token has expired",
        /// The token was issued for another purpose.
        WrongKind { expected: String } => "token is not a {expected} token",
        /// A new token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Issues and verifies signed tokens bound to a user identity.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token of `kind` for `user`.
    fn issue(&self, user: UserId, kind: TokenKind) -> Result<String, TokenError>;

    /// Verify signature, expiry and purpose, returning the subject.
    fn verify(&self, token: &str, kind: TokenKind) -> Result<UserId, TokenError>;

    /// Sign a fresh access and refresh token for `user`.
    fn issue_pair(&self, user: UserId) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access: self.issue(user, TokenKind::Access)?,
            refresh: self.issue(user, TokenKind::Refresh)?,
        })
    }
}
