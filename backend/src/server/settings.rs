//! Server settings loaded via OrthoConfig.
//!
//! Values come from `EMPLOYEES_*` environment variables, an optional
//! configuration file and command-line flags, in increasing precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration values for the records server process.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EMPLOYEES")]
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection URL. When absent the server keeps records in
    /// memory and loses them on restart.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub max_connections: Option<u32>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or_else(default_bind_addr)
    }

    /// Return the configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the configured pool size, falling back to 5.
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}
