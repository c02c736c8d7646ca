//! Authentication primitives: credentials, registrations and token material.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{DisplayName, EmailAddress, User, UserValidationError};
use super::validation::FieldErrors;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl LoginValidationError {
    /// Payload field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "email",
            Self::EmptyPassword => "password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "This field may not be blank.")
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and non-empty. It is not checked for
///   shape so that malformed input fails as bad credentials.
/// - `password` is non-empty but retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" A@X.com ", "pw").unwrap();
/// assert_eq!(creds.email(), "a@x.com");
/// assert_eq!(creds.password(), "pw");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for the user lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: EmailAddress,
    display_name: DisplayName,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate every registration field, collecting all failures.
    ///
    /// `None` inputs are reported as required fields.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Registration;
    ///
    /// let errors = Registration::try_from_parts(Some("bad"), None, Some(""))
    ///     .unwrap_err();
    /// assert_eq!(errors.messages("email"), ["Enter a valid email address."]);
    /// assert_eq!(errors.messages("displayName"), ["This field is required."]);
    /// assert_eq!(errors.messages("password"), ["This field may not be blank."]);
    /// ```
    pub fn try_from_parts(
        email: Option<&str>,
        display_name: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let email = match email {
            Some(raw) => errors.check("email", EmailAddress::new(raw)),
            None => {
                errors.required("email");
                None
            }
        };
        let display_name = match display_name {
            Some(raw) => errors.check("displayName", DisplayName::new(raw)),
            None => {
                errors.required("displayName");
                None
            }
        };
        let password = match password {
            Some("") => {
                errors.push("password", LoginValidationError::EmptyPassword);
                None
            }
            Some(raw) => Some(Zeroizing::new(raw.to_owned())),
            None => {
                errors.required("password");
                None
            }
        };

        match (email, display_name, password) {
            (Some(email), Some(display_name), Some(password)) if errors.is_empty() => Ok(Self {
                email,
                display_name,
                password,
            }),
            _ => Err(errors),
        }
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl From<UserValidationError> for FieldErrors {
    fn from(value: UserValidationError) -> Self {
        let field = match value {
            UserValidationError::EmptyEmail
            | UserValidationError::InvalidEmail
            | UserValidationError::EmailTooLong { .. } => "email",
            UserValidationError::EmptyDisplayName
            | UserValidationError::DisplayNameTooLong { .. } => "displayName",
        };
        let mut errors = FieldErrors::default();
        errors.push(field, value);
        errors
    }
}

/// PHC-formatted password hash. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Purpose a signed token was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`TokenKind`] from a claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenKindError {
    pub input: String,
}

impl fmt::Display for ParseTokenKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown token kind: {}", self.input)
    }
}

impl std::error::Error for ParseTokenKindError {}

impl std::str::FromStr for TokenKind {
    type Err = ParseTokenKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(Self::Access),
            "refresh" => Ok(Self::Refresh),
            other => Err(ParseTokenKindError {
                input: other.to_owned(),
            }),
        }
    }
}

/// Freshly issued access and refresh tokens.
///
/// The refresh token leaves the process only through the refresh cookie.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredAccount {
    pub user: User,
    pub tokens: TokenPair,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("a@x.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  A@X.com  ", " padded secret ")]
    #[case("alice@example.org", "correct horse battery staple")]
    fn valid_credentials_normalise_email(#[case] email: &str, #[case] password: &str) {
        let creds =
            LoginCredentials::try_from_parts(email, password).expect("valid inputs succeed");
        assert_eq!(creds.email(), email.trim().to_lowercase());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn registration_accepts_valid_parts() {
        let registration =
            Registration::try_from_parts(Some("A@X.com"), Some(" Ada "), Some("p"))
                .expect("valid registration");
        assert_eq!(registration.email().as_ref(), "a@x.com");
        assert_eq!(registration.display_name().as_ref(), "Ada");
        assert_eq!(registration.password(), "p");
    }

    #[rstest]
    fn registration_reports_every_missing_field() {
        let errors = Registration::try_from_parts(None, None, None).expect_err("all missing");
        for field in ["email", "displayName", "password"] {
            assert_eq!(errors.messages(field), [crate::domain::validation::REQUIRED]);
        }
    }

    #[rstest]
    fn secrets_are_redacted_in_debug_output() {
        let hash = PasswordHash::new("$argon2id$v=19$secret");
        let pair = TokenPair {
            access: "aaa".into(),
            refresh: "rrr".into(),
        };
        assert!(!format!("{hash:?}").contains("secret"));
        let rendered = format!("{pair:?}");
        assert!(!rendered.contains("aaa"));
        assert!(!rendered.contains("rrr"));
    }

    #[rstest]
    #[case("access", TokenKind::Access)]
    #[case("refresh", TokenKind::Refresh)]
    fn token_kind_parses_claim_values(#[case] input: &str, #[case] expected: TokenKind) {
        assert_eq!(input.parse::<TokenKind>(), Ok(expected));
        assert_eq!(expected.as_str(), input);
    }

    #[rstest]
    fn token_kind_rejects_unknown_values() {
        let err = "id".parse::<TokenKind>().expect_err("unknown kind");
        assert_eq!(err.input, "id");
    }
}
