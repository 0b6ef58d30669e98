//! Service entry point: settings, database preparation, HTTP server.

use std::net::SocketAddr;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use orgdir::bootstrap::{prepare_database, AppSettings};
use orgdir::inbound::http::health::HealthState;
use orgdir::server::{create_server, ServerConfig};

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

    let settings = AppSettings::load().map_err(std::io::Error::other)?;
    let bind_addr: SocketAddr = settings.bind_addr().parse().map_err(std::io::Error::other)?;

    let db_pool = prepare_database(&settings)
        .await
        .map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(bind_addr);
    if let Some(pool) = db_pool {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, &config)?.await
}
