//! Backend entry-point: loads settings, prepares the record store and serves
//! the employee API.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use records_backend::inbound::http::health::HealthState;
use records_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use records_backend::server::{ServerConfig, ServerSettings, create_server};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

/// Connect to PostgreSQL and migrate when a database URL is configured.
async fn build_server_config(settings: &ServerSettings) -> Result<ServerConfig> {
    let config = ServerConfig::new(settings.bind_addr());
    let Some(database_url) = settings.database_url() else {
        warn!("no database URL configured; records are kept in memory");
        return Ok(config);
    };

    run_pending_migrations(database_url)
        .await
        .wrap_err("apply database migrations")?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.max_connections()),
    )
    .await
    .wrap_err("build database pool")?;
    info!(max_connections = settings.max_connections(), "database pool ready");
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("load server settings: {err}"))?;
    let config = build_server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let bound = create_server(health_state.clone(), config).wrap_err("start HTTP server")?;
    bound.server.await.wrap_err("run HTTP server")?;
    health_state.mark_unhealthy();
    Ok(())
}
