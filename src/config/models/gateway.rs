//! Main gateway configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// External dependency endpoints
    #[serde(default)]
    pub dependencies: DependenciesConfig,
    /// Monitoring configuration
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

impl GatewayConfig {
    /// Build a configuration from environment variables, falling back to defaults
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("GATEWAY_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("GATEWAY_PORT") {
            config.server.port = port.parse().map_err(|_| {
                crate::utils::error::GatewayError::Config(format!("Invalid GATEWAY_PORT: {}", port))
            })?;
        }
        if let Ok(url) = std::env::var("QDRANT_URL") {
            config.dependencies.qdrant.url = url;
        }
        if let Ok(url) = std::env::var("NEO4J_URL") {
            config.dependencies.neo4j.url = url;
        }
        if let Ok(user) = std::env::var("NEO4J_USERNAME") {
            config.dependencies.neo4j.username = user;
        }
        if let Ok(password) = std::env::var("NEO4J_PASSWORD") {
            config.dependencies.neo4j.password = password;
        }
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            config.dependencies.ollama.url = url;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.dependencies = self.dependencies.merge(other.dependencies);
        self.monitoring = self.monitoring.merge(other.monitoring);
        self
    }
}
