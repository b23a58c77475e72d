//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for automatic configuration loading.

use tracing::info;

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
pub async fn run_server() -> Result<()> {
    info!("Starting docgraph gateway");

    let config_path = "config/gateway.yaml";
    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("Configuration loaded from {}", config_path);
            config
        }
        Err(e) => {
            info!(
                "Configuration file not usable ({}), falling back to defaults",
                e
            );
            Config::default()
        }
    };

    // Environment variables take precedence over file values
    let config = config.merge(Config::from_env()?);

    let server = HttpServer::new(&config).await?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("API endpoints:");
    info!("   GET  /health                       - Basic health check");
    info!("   GET  /health/detailed              - Per-dependency health");
    info!("   GET  /version                      - Build information");
    info!("   GET  /diagnostics/system           - Process stats and score");
    info!("   GET  /diagnostics/connectivity     - Dependency connectivity");
    info!("   GET  /diagnostics/comprehensive    - Full diagnostic payload");
    info!("   GET  /diagnostics/score            - System health score");
    info!("   GET  /diagnostics/trends/{{service}} - Score trend");
    info!("   GET  /diagnostics/alerts           - Current alerts");
    info!("   GET  /diagnostics/cache            - Cache statistics");
    info!("   GET  /diagnostics/recommendations  - Troubleshooting hints");
    info!("   GET  /diagnostics/report           - Downloadable report");

    server.start().await
}
