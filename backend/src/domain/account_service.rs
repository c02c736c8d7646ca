//! Account service: registration, login, token refresh and bearer checks.
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::task;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::fields::storage_timestamp;
use crate::domain::ports::{
    AccountCommand, AccountQuery, BearerAuthenticator, PasswordHasher, TokenIssuer,
    UserRepository,
};
use crate::domain::repository_error_mapping::{
    map_password_hash_error, map_token_error, map_user_repository_error,
};
use crate::domain::{
    Error, LoginCredentials, NewUser, PasswordHash, RegisteredAccount, Registration, TokenKind,
    TokenPair, User, UserId,
};

const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";

/// Account use-cases backed by a user repository, a password hasher and a
/// token issuer.
#[derive(Clone)]
pub struct AccountService<R> {
    users: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    clock: Arc<dyn Clock>,
}

impl<R> AccountService<R> {
    pub fn new(
        users: Arc<R>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<R> AccountService<R>
where
    R: UserRepository,
{
    async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_password_hash_error)
    }

    async fn verify_password(&self, password: &str, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        task::spawn_blocking(move || hasher.verify(password.as_str(), &hash))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
    }

    /// Spend one hash derivation on `password` so unknown emails cost as
    /// much as a failed verification.
    async fn burn_password_work(&self, password: &str) {
        if let Err(err) = self.hash_password(password).await {
            debug!(error = %err, "decoy password hash failed");
        }
    }

    fn issue_pair(&self, user_id: UserId) -> Result<TokenPair, Error> {
        self.tokens.issue_pair(user_id).map_err(map_token_error)
    }

    async fn existing_user(&self, user_id: UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)
    }
}

#[async_trait]
impl<R> AccountCommand for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<RegisteredAccount, Error> {
        let password_hash = self.hash_password(registration.password()).await?;
        let new_user = NewUser {
            email: registration.email().clone(),
            display_name: registration.display_name().clone(),
            password_hash,
            joined_at: storage_timestamp(self.clock.utc()),
        };

        let user = self
            .users
            .insert(&new_user)
            .await
            .map_err(map_user_repository_error)?;
        let tokens = self.issue_pair(user.id())?;

        info!(user_id = %user.id(), "registered user");
        Ok(RegisteredAccount { user, tokens })
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<TokenPair, Error> {
        let stored = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_repository_error)?;

        let Some(stored) = stored else {
            self.burn_password_work(credentials.password()).await;
            info!("login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let user_id = stored.user.id();
        if !self
            .verify_password(credentials.password(), stored.password_hash)
            .await?
        {
            info!(user_id = %user_id, "login rejected: wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let tokens = self.issue_pair(user_id)?;
        info!(user_id = %user_id, "login succeeded");
        Ok(tokens)
    }

    async fn refresh(&self, refresh_token: Option<String>) -> Result<TokenPair, Error> {
        let Some(refresh_token) = refresh_token.filter(|token| !token.is_empty()) else {
            return Err(Error::unauthorized("refresh token is missing"));
        };

        let user_id = self
            .tokens
            .verify(&refresh_token, TokenKind::Refresh)
            .map_err(map_token_error)?;
        if self.existing_user(user_id).await?.is_none() {
            info!(user_id = %user_id, "refresh rejected: user no longer exists");
            return Err(Error::unauthorized("token is invalid or expired"));
        }

        let tokens = self.issue_pair(user_id)?;
        info!(user_id = %user_id, "refresh token rotated");
        Ok(tokens)
    }
}

#[async_trait]
impl<R> AccountQuery for AccountService<R>
where
    R: UserRepository,
{
    async fn current_user(&self, user_id: UserId) -> Result<User, Error> {
        self.existing_user(user_id)
            .await?
            .ok_or_else(|| Error::unauthorized("user no longer exists"))
    }
}

impl<R> BearerAuthenticator for AccountService<R>
where
    R: UserRepository,
{
    fn authenticate(&self, token: &str) -> Result<UserId, Error> {
        self.tokens
            .verify(token, TokenKind::Access)
            .map_err(map_token_error)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
