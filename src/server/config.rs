//! Server configuration.

use std::net::SocketAddr;

use crate::config::DashboardConfig;
use crate::error::{BotScopeError, Result};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub addr: SocketAddr,
    /// CORS enabled
    pub cors_enabled: bool,
    /// Enable request logging
    pub logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_enabled: true,
            logging: true,
        }
    }
}

impl ServerConfig {
    /// Build from the `[dashboard]` config section
    pub fn from_dashboard(config: &DashboardConfig) -> Result<Self> {
        let addr = config.listen_addr().parse().map_err(|e| {
            BotScopeError::Config(format!("Invalid listen address {}: {e}", config.listen_addr()))
        })?;

        Ok(Self {
            addr,
            cors_enabled: config.cors,
            ..Default::default()
        })
    }

    /// Create with custom port
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr.set_port(port);
        self
    }

    /// Set address directly
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Disable logging
    pub fn without_logging(mut self) -> Self {
        self.logging = false;
        self
    }

    /// Disable CORS
    pub fn without_cors(mut self) -> Self {
        self.cors_enabled = false;
        self
    }
}
