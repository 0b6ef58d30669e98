//! Application configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values controlling service start-up.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ORGDIR")]
pub struct AppSettings {
    /// PostgreSQL connection URL; when absent the server runs on fixtures.
    pub database_url: Option<String>,
    /// Drop and recreate the schema before serving.
    #[ortho_config(default = false)]
    pub reset_schema: bool,
    /// Listen address override in `host:port` form.
    pub listen_addr: Option<String>,
    /// Optional override for the connection pool size.
    pub pool_max_size: Option<u32>,
}

impl AppSettings {
    /// Return the configured listen address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.listen_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Pool settings for the configured database, `None` without a URL.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let config = PoolConfig::new(url);
        Some(match self.pool_max_size {
            Some(max_size) => config.with_max_size(max_size),
            None => config,
        })
    }
}
