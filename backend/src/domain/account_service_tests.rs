//! Tests for the account service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockPasswordHasher, MockTokenIssuer, MockUserRepository, TokenError, UserPersistenceError,
};
use crate::domain::{DisplayName, EmailAddress, ErrorCode, StoredUser};

struct FixtureClock(DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[fixture]
fn joined_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 2, 8, 15, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn ada(joined_at: DateTime<Utc>) -> User {
    User::new(
        UserId::new(1),
        EmailAddress::new("a@x.com").expect("valid email"),
        DisplayName::new("Ada").expect("valid name"),
        joined_at,
    )
}

fn pair() -> TokenPair {
    TokenPair {
        access: "access-token".to_owned(),
        refresh: "refresh-token".to_owned(),
    }
}

fn make_service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    tokens: MockTokenIssuer,
    joined_at: DateTime<Utc>,
) -> AccountService<MockUserRepository> {
    AccountService::new(
        Arc::new(users),
        Arc::new(hasher),
        Arc::new(tokens),
        Arc::new(FixtureClock(joined_at)),
    )
}

fn registration() -> Registration {
    Registration::try_from_parts(Some("A@x.com"), Some("Ada"), Some("p4ssword"))
        .expect("valid registration")
}

#[rstest]
#[tokio::test]
async fn register_stores_hash_and_issues_tokens(joined_at: DateTime<Utc>) {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .withf(|plaintext| plaintext == "p4ssword")
        .times(1)
        .returning(|_| Ok(PasswordHash::new("$argon2id$stub")));

    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .withf(move |new_user: &NewUser| {
            new_user.email.as_ref() == "a@x.com"
                && new_user.password_hash.as_str() == "$argon2id$stub"
                && new_user.joined_at == joined_at
        })
        .times(1)
        .returning(move |_| Ok(ada(joined_at)));

    let mut tokens = MockTokenIssuer::new();
    tokens
        .expect_issue_pair()
        .withf(|user| *user == UserId::new(1))
        .times(1)
        .returning(|_| Ok(pair()));

    let service = make_service(users, hasher, tokens, joined_at);
    let registered = service
        .register(registration())
        .await
        .expect("registration succeeds");

    assert_eq!(registered.user.id(), UserId::new(1));
    assert_eq!(registered.tokens, pair());
}

#[rstest]
#[tokio::test]
async fn register_duplicate_email_is_conflict(joined_at: DateTime<Utc>) {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Ok(PasswordHash::new("$argon2id$stub")));
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .returning(|new_user| Err(UserPersistenceError::duplicate_email(new_user.email.as_ref())));
    let mut tokens = MockTokenIssuer::new();
    tokens.expect_issue_pair().never();

    let service = make_service(users, hasher, tokens, joined_at);
    let err = service
        .register(registration())
        .await
        .expect_err("duplicate email");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(None, false)]
#[case(Some(false), true)]
#[tokio::test]
async fn login_rejects_unknown_email_and_wrong_password_alike(
    joined_at: DateTime<Utc>,
    #[case] password_matches: Option<bool>,
    #[case] user_exists: bool,
) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(move |_| {
        Ok(user_exists.then(|| StoredUser {
            user: ada(joined_at),
            password_hash: PasswordHash::new("$argon2id$stub"),
        }))
    });
    let mut hasher = MockPasswordHasher::new();
    match password_matches {
        Some(matches) => {
            hasher.expect_verify().times(1).returning(move |_, _| matches);
            hasher.expect_hash().never();
        }
        None => {
            hasher.expect_verify().never();
            hasher
                .expect_hash()
                .withf(|plaintext| plaintext == "wrong")
                .times(1)
                .returning(|_| Ok(PasswordHash::new("$argon2id$decoy")));
        }
    }
    let mut tokens = MockTokenIssuer::new();
    tokens.expect_issue_pair().never();

    let service = make_service(users, hasher, tokens, joined_at);
    let credentials =
        LoginCredentials::try_from_parts("a@x.com", "wrong").expect("credential shape");
    let err = service.login(credentials).await.expect_err("rejected");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), INVALID_CREDENTIALS);
}

#[rstest]
#[tokio::test]
async fn login_with_matching_password_issues_tokens(joined_at: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .withf(|email| email == "a@x.com")
        .returning(move |_| {
            Ok(Some(StoredUser {
                user: ada(joined_at),
                password_hash: PasswordHash::new("$argon2id$stub"),
            }))
        });
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|plaintext, hash| plaintext == "p4ssword" && hash.as_str() == "$argon2id$stub")
        .returning(|_, _| true);
    let mut tokens = MockTokenIssuer::new();
    tokens.expect_issue_pair().times(1).returning(|_| Ok(pair()));

    let service = make_service(users, hasher, tokens, joined_at);
    let credentials =
        LoginCredentials::try_from_parts("A@X.com", "p4ssword").expect("credential shape");
    let issued = service.login(credentials).await.expect("login succeeds");

    assert_eq!(issued, pair());
}

#[rstest]
#[case(None)]
#[case(Some(String::new()))]
#[tokio::test]
async fn refresh_without_token_is_unauthorized(
    joined_at: DateTime<Utc>,
    #[case] token: Option<String>,
) {
    let mut tokens = MockTokenIssuer::new();
    tokens.expect_verify().never();
    let service = make_service(
        MockUserRepository::new(),
        MockPasswordHasher::new(),
        tokens,
        joined_at,
    );

    let err = service.refresh(token).await.expect_err("missing token");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case(TokenError::expired())]
#[case(TokenError::malformed("signature mismatch"))]
#[case(TokenError::wrong_kind("refresh"))]
#[tokio::test]
async fn refresh_with_rejected_token_issues_nothing(
    joined_at: DateTime<Utc>,
    #[case] rejection: TokenError,
) {
    let mut tokens = MockTokenIssuer::new();
    tokens
        .expect_verify()
        .withf(|_, kind| *kind == TokenKind::Refresh)
        .return_once(move |_, _| Err(rejection));
    tokens.expect_issue_pair().never();
    let service = make_service(
        MockUserRepository::new(),
        MockPasswordHasher::new(),
        tokens,
        joined_at,
    );

    let err = service
        .refresh(Some("stale".to_owned()))
        .await
        .expect_err("rejected token");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn refresh_rotates_tokens_for_existing_user(joined_at: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(ada(joined_at))));
    let mut tokens = MockTokenIssuer::new();
    tokens
        .expect_verify()
        .returning(|_, _| Ok(UserId::new(1)));
    tokens.expect_issue_pair().times(1).returning(|_| Ok(pair()));

    let service = make_service(users, MockPasswordHasher::new(), tokens, joined_at);
    let issued = service
        .refresh(Some("refresh-token".to_owned()))
        .await
        .expect("refresh succeeds");

    assert_eq!(issued, pair());
}

#[rstest]
#[tokio::test]
async fn refresh_for_deleted_user_is_unauthorized(joined_at: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));
    let mut tokens = MockTokenIssuer::new();
    tokens
        .expect_verify()
        .returning(|_, _| Ok(UserId::new(9)));
    tokens.expect_issue_pair().never();

    let service = make_service(users, MockPasswordHasher::new(), tokens, joined_at);
    let err = service
        .refresh(Some("refresh-token".to_owned()))
        .await
        .expect_err("user gone");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
fn authenticate_checks_access_kind(joined_at: DateTime<Utc>) {
    let mut tokens = MockTokenIssuer::new();
    tokens
        .expect_verify()
        .withf(|token, kind| token == "bearer" && *kind == TokenKind::Access)
        .returning(|_, _| Ok(UserId::new(4)));
    let service = make_service(
        MockUserRepository::new(),
        MockPasswordHasher::new(),
        tokens,
        joined_at,
    );

    assert_eq!(service.authenticate("bearer"), Ok(UserId::new(4)));
}

#[rstest]
#[tokio::test]
async fn current_user_maps_connection_failure_to_unavailable(joined_at: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Err(UserPersistenceError::connection("pool timed out")));
    let service = make_service(
        users,
        MockPasswordHasher::new(),
        MockTokenIssuer::new(),
        joined_at,
    );

    let err = service
        .current_user(UserId::new(1))
        .await
        .expect_err("store down");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
