//! Backend entry-point: loads settings, prepares storage and serves the API.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use sales_backend::inbound::http::health::HealthState;
use sales_backend::inbound::http::session_config::{BuildMode, session_settings};
use sales_backend::outbound::persistence::{
    DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, run_pending_migrations,
};
use sales_backend::settings::AppSettings;

mod server;

#[cfg(feature = "metrics")]
use server::metrics::build_prometheus;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(|err| std::io::Error::other(format!("invalid session settings: {err}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let mut config = ServerConfig::new(session, bind_addr);
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(connect_database(&settings, url).await?);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(build_prometheus()?));

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting sales backend");
    create_server(health_state, config)?.await
}

async fn connect_database(settings: &AppSettings, url: &str) -> std::io::Result<DbPool> {
    let applied = run_pending_migrations(url)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    info!(applied, "database schema up to date");

    let max_size = settings
        .db_max_connections
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);
    DbPool::new(PoolConfig::new(url).with_max_size(max_size))
        .await
        .map_err(|err| std::io::Error::other(format!("database pool: {err}")))
}
