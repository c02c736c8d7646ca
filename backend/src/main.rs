//! Backend entry-point: loads settings, migrates the database and serves the
//! REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, run_pending_migrations};
use server::settings::AppSettings;
use server::signing_secret::load_signing_secret;
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let pool_config = settings.pool_config()?;
    let lifetimes = settings.token_lifetimes()?;

    let allow_ephemeral = cfg!(debug_assertions) || settings.jwt_allow_ephemeral;
    let secret = load_signing_secret(&settings.secret_path(), allow_ephemeral)?;
    info!(fingerprint = %secret.fingerprint(), "token signing secret loaded");

    run_pending_migrations(pool_config.database_url())
        .await
        .wrap_err("failed to apply database migrations")?;
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;

    let config = ServerConfig::new(settings.bind_addr(), pool, secret, lifetimes)
        .with_cookie_secure(settings.cookie_secure)
        .with_ownership_policy(settings.ownership_policy());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}
