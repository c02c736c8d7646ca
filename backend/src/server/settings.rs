//! Application settings loaded via OrthoConfig.
//!
//! Values come from `TASKING_*` environment variables, CLI flags or a config
//! file; accessors apply the defaults. Boolean toggles come from the
//! environment or config file only.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::domain::OwnershipPolicy;
use backend::outbound::persistence::PoolConfig;
use backend::outbound::security::{DEFAULT_ACCESS_TTL, DEFAULT_REFRESH_TTL, TokenLifetimes};

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(std::net::SocketAddrV4::new(std::net::Ipv4Addr::UNSPECIFIED, 8080));
const DEFAULT_SECRET_PATH: &str = "/var/run/secrets/jwt_secret";

/// Errors raised when settings are incomplete or out of range.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("TASKING_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("{name} must be a positive number of seconds, got {value}")]
    InvalidTtl { name: &'static str, value: i64 },
    #[error("TASKING_DB_POOL_MAX_SIZE must be at least 1")]
    EmptyPool,
}

/// Runtime configuration for the `tasking` server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKING")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_pool_max_size: Option<u32>,
    /// File holding the token signing secret.
    pub jwt_secret_file: Option<PathBuf>,
    /// Generate a throwaway signing secret when the file is unreadable.
    #[ortho_config(default = false, skip_cli)]
    pub jwt_allow_ephemeral: bool,
    /// Access token lifetime in seconds.
    pub access_token_ttl_secs: Option<i64>,
    /// Refresh token and cookie lifetime in seconds.
    pub refresh_token_ttl_secs: Option<i64>,
    /// Mark the refresh cookie `Secure`.
    #[ortho_config(default = true, skip_cli)]
    pub cookie_secure: bool,
    /// Answer 404 instead of 403 for resources owned by someone else.
    #[ortho_config(default = false, skip_cli)]
    pub conceal_foreign_resources: bool,
}

impl AppSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn secret_path(&self) -> PathBuf {
        self.jwt_secret_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRET_PATH))
    }

    pub fn ownership_policy(&self) -> OwnershipPolicy {
        OwnershipPolicy::from_conceal_flag(self.conceal_foreign_resources)
    }

    /// Pool settings for the configured database.
    ///
    /// # Errors
    /// Fails when no database URL is configured or the pool size is zero.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let url = self
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)?;
        let config = PoolConfig::new(url);
        match self.db_pool_max_size {
            Some(0) => Err(SettingsError::EmptyPool),
            Some(size) => Ok(config.with_max_size(size)),
            None => Ok(config),
        }
    }

    /// Access and refresh token lifetimes.
    ///
    /// # Errors
    /// Fails when either lifetime is zero or negative.
    pub fn token_lifetimes(&self) -> Result<TokenLifetimes, SettingsError> {
        Ok(TokenLifetimes {
            access: ttl(
                "TASKING_ACCESS_TOKEN_TTL_SECS",
                self.access_token_ttl_secs,
                DEFAULT_ACCESS_TTL,
            )?,
            refresh: ttl(
                "TASKING_REFRESH_TOKEN_TTL_SECS",
                self.refresh_token_ttl_secs,
                DEFAULT_REFRESH_TTL,
            )?,
        })
    }
}

fn ttl(
    name: &'static str,
    seconds: Option<i64>,
    default: TimeDelta,
) -> Result<TimeDelta, SettingsError> {
    match seconds {
        None => Ok(default),
        Some(value) if value > 0 => TimeDelta::try_seconds(value)
            .ok_or(SettingsError::InvalidTtl { name, value }),
        Some(value) => Err(SettingsError::InvalidTtl { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 9] = [
        "TASKING_BIND_ADDR",
        "TASKING_DATABASE_URL",
        "TASKING_DB_POOL_MAX_SIZE",
        "TASKING_JWT_SECRET_FILE",
        "TASKING_JWT_ALLOW_EPHEMERAL",
        "TASKING_ACCESS_TOKEN_TTL_SECS",
        "TASKING_REFRESH_TOKEN_TTL_SECS",
        "TASKING_COOKIE_SECURE",
        "TASKING_CONCEAL_FOREIGN_RESOURCES",
    ];

    fn load_with(overrides: &[(&str, &str)]) -> AppSettings {
        load_with_args(overrides, &[])
    }

    fn load_with_args(overrides: &[(&str, &str)], args: &[&str]) -> AppSettings {
        let _guard = lock_env(VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        }));
        let argv = std::iter::once("tasking")
            .chain(args.iter().copied())
            .map(OsString::from);
        AppSettings::load_from_iter(argv).expect("settings should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = load_with(&[]);

        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(settings.secret_path(), PathBuf::from(DEFAULT_SECRET_PATH));
        assert!(settings.cookie_secure);
        assert!(!settings.jwt_allow_ephemeral);
        assert_eq!(settings.ownership_policy(), OwnershipPolicy::RevealForbidden);
        assert_eq!(
            settings.token_lifetimes(),
            Ok(TokenLifetimes {
                access: DEFAULT_ACCESS_TTL,
                refresh: DEFAULT_REFRESH_TTL,
            })
        );
        assert_eq!(
            settings.pool_config().err(),
            Some(SettingsError::MissingDatabaseUrl)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("TASKING_BIND_ADDR", "127.0.0.1:9000"),
            ("TASKING_DATABASE_URL", "postgres://localhost/tasking"),
            ("TASKING_DB_POOL_MAX_SIZE", "4"),
            ("TASKING_ACCESS_TOKEN_TTL_SECS", "60"),
            ("TASKING_COOKIE_SECURE", "false"),
            ("TASKING_CONCEAL_FOREIGN_RESOURCES", "true"),
        ]);

        assert_eq!(settings.bind_addr().port(), 9000);
        let pool = settings.pool_config().expect("pool config");
        assert_eq!(pool.database_url(), "postgres://localhost/tasking");
        assert_eq!(pool.max_size(), 4);
        assert!(!settings.cookie_secure);
        assert_eq!(
            settings.ownership_policy(),
            OwnershipPolicy::ConcealAsNotFound
        );
        let lifetimes = settings.token_lifetimes().expect("lifetimes");
        assert_eq!(lifetimes.access, TimeDelta::seconds(60));
        assert_eq!(lifetimes.refresh, DEFAULT_REFRESH_TTL);
    }

    #[rstest]
    #[case(&[], true, false)]
    #[case(&[("TASKING_COOKIE_SECURE", "false")], false, false)]
    #[case(&[("TASKING_CONCEAL_FOREIGN_RESOURCES", "true")], true, true)]
    #[case(
        &[("TASKING_COOKIE_SECURE", "true"), ("TASKING_CONCEAL_FOREIGN_RESOURCES", "false")],
        true,
        false
    )]
    fn boolean_toggles_survive_cli_arguments(
        #[case] overrides: &[(&str, &str)],
        #[case] secure: bool,
        #[case] conceal: bool,
    ) {
        let settings = load_with_args(overrides, &["--bind-addr", "127.0.0.1:9100"]);

        assert_eq!(settings.bind_addr().port(), 9100);
        assert_eq!(settings.cookie_secure, secure);
        assert_eq!(settings.conceal_foreign_resources, conceal);
        assert!(!settings.jwt_allow_ephemeral);
    }

    #[rstest]
    #[case(Some(0), Err(SettingsError::InvalidTtl { name: "n", value: 0 }))]
    #[case(Some(-5), Err(SettingsError::InvalidTtl { name: "n", value: -5 }))]
    #[case(None, Ok(TimeDelta::minutes(5)))]
    #[case(Some(30), Ok(TimeDelta::seconds(30)))]
    fn ttl_must_be_positive(
        #[case] seconds: Option<i64>,
        #[case] expected: Result<TimeDelta, SettingsError>,
    ) {
        assert_eq!(ttl("n", seconds, TimeDelta::minutes(5)), expected);
    }

    #[rstest]
    fn zero_pool_size_is_rejected() {
        let settings = load_with(&[
            ("TASKING_DATABASE_URL", "postgres://localhost/tasking"),
            ("TASKING_DB_POOL_MAX_SIZE", "0"),
        ]);

        assert_eq!(settings.pool_config().err(), Some(SettingsError::EmptyPool));
    }
}
