//! HS256 JWT adapter for the `TokenIssuer` port.
//!
//! Expiry is checked against the injected [`Clock`] rather than the system
//! time so token lifetimes are testable.

use std::fmt;
use std::sync::Arc;

use chrono::TimeDelta;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::{TokenKind, UserId};

/// Default access-token lifetime.
pub const DEFAULT_ACCESS_TTL: TimeDelta = TimeDelta::minutes(5);
/// Default refresh-token lifetime.
pub const DEFAULT_REFRESH_TTL: TimeDelta = TimeDelta::days(7);

/// Lifetimes applied to newly issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: TimeDelta,
    pub refresh: TimeDelta,
}

impl TokenLifetimes {
    pub const fn for_kind(&self, kind: TokenKind) -> TimeDelta {
        match kind {
            TokenKind::Access => self.access,
            TokenKind::Refresh => self.refresh,
        }
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: DEFAULT_ACCESS_TTL,
            refresh: DEFAULT_REFRESH_TTL,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    kind: String,
    iat: i64,
    exp: i64,
    jti: String,
}

/// Signs and verifies access and refresh tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetimes: TokenLifetimes,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for JwtTokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenIssuer")
            .field("lifetimes", &self.lifetimes)
            .finish_non_exhaustive()
    }
}

impl JwtTokenIssuer {
    pub fn new(secret: &[u8], lifetimes: TokenLifetimes, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            lifetimes,
            clock,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: UserId, kind: TokenKind) -> Result<String, TokenError> {
        let now = self.clock.utc();
        let claims = Claims {
            sub: user.to_string(),
            kind: kind.as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + self.lifetimes.for_kind(kind)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str, kind: TokenKind) -> Result<UserId, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| {
                debug!(error = %err, "token rejected");
                TokenError::malformed(err.to_string())
            })?
            .claims;

        if claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::expired());
        }

        let presented: TokenKind = claims
            .kind
            .parse()
            .map_err(|_| TokenError::malformed("unknown token kind"))?;
        if presented != kind {
            return Err(TokenError::wrong_kind(kind.as_str()));
        }

        claims
            .sub
            .parse::<UserId>()
            .map_err(|_| TokenError::malformed("subject is not a user id"))
    }
}
