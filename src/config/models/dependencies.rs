//! External dependency endpoint configuration
//!
//! The gateway fronts three external engines: Qdrant (vectors), Neo4j
//! (graph) and Ollama (LLM). Each gets an endpoint URL and a per-probe
//! timeout.

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoints for all external dependencies
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DependenciesConfig {
    /// Qdrant vector store
    #[serde(default)]
    pub qdrant: QdrantConfig,
    /// Neo4j graph store
    #[serde(default)]
    pub neo4j: Neo4jConfig,
    /// Ollama LLM runtime
    #[serde(default)]
    pub ollama: OllamaConfig,
}

impl DependenciesConfig {
    /// Merge dependency configurations
    pub fn merge(mut self, other: Self) -> Self {
        self.qdrant = self.qdrant.merge(other.qdrant);
        self.neo4j = self.neo4j.merge(other.neo4j);
        self.ollama = self.ollama.merge(other.ollama);
        self
    }

    /// Validate dependency configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, url, timeout) in [
            ("qdrant", &self.qdrant.url, self.qdrant.timeout_secs),
            ("neo4j", &self.neo4j.url, self.neo4j.timeout_secs),
            ("ollama", &self.ollama.url, self.ollama.timeout_secs),
        ] {
            if url.is_empty() {
                return Err(format!("{} URL cannot be empty", name));
            }
            if timeout == 0 {
                return Err(format!("{} probe timeout cannot be 0", name));
            }
        }
        Ok(())
    }

    /// Clone with credentials masked, for configuration snapshots
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.neo4j.password.is_empty() {
            copy.neo4j.password = "***".to_string();
        }
        copy
    }
}

/// Qdrant endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantConfig {
    /// Base URL of the Qdrant HTTP API
    #[serde(default = "default_qdrant_url")]
    pub url: String,
    /// Probe timeout in seconds
    #[serde(default = "default_probe_timeout")]
    pub timeout_secs: u64,
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: default_qdrant_url(),
            timeout_secs: default_probe_timeout(),
        }
    }
}

impl QdrantConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if other.url != default_qdrant_url() {
            self.url = other.url;
        }
        if other.timeout_secs != default_probe_timeout() {
            self.timeout_secs = other.timeout_secs;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Neo4j endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neo4jConfig {
    /// Base URL of the Neo4j HTTP API
    #[serde(default = "default_neo4j_url")]
    pub url: String,
    /// Basic-auth username
    #[serde(default = "default_neo4j_username")]
    pub username: String,
    /// Basic-auth password
    #[serde(default)]
    pub password: String,
    /// Database name for cypher transactions
    #[serde(default = "default_neo4j_database")]
    pub database: String,
    /// Probe timeout in seconds
    #[serde(default = "default_probe_timeout")]
    pub timeout_secs: u64,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            url: default_neo4j_url(),
            username: default_neo4j_username(),
            password: String::new(),
            database: default_neo4j_database(),
            timeout_secs: default_probe_timeout(),
        }
    }
}

impl Neo4jConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if other.url != default_neo4j_url() {
            self.url = other.url;
        }
        if other.username != default_neo4j_username() {
            self.username = other.username;
        }
        if !other.password.is_empty() {
            self.password = other.password;
        }
        if other.database != default_neo4j_database() {
            self.database = other.database;
        }
        if other.timeout_secs != default_probe_timeout() {
            self.timeout_secs = other.timeout_secs;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Ollama endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama HTTP API
    #[serde(default = "default_ollama_url")]
    pub url: String,
    /// Probe timeout in seconds
    #[serde(default = "default_probe_timeout")]
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            timeout_secs: default_probe_timeout(),
        }
    }
}

impl OllamaConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if other.url != default_ollama_url() {
            self.url = other.url;
        }
        if other.timeout_secs != default_probe_timeout() {
            self.timeout_secs = other.timeout_secs;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_qdrant_url() -> String {
    "http://localhost:6333".to_string()
}

fn default_neo4j_url() -> String {
    "http://localhost:7474".to_string()
}

fn default_neo4j_username() -> String {
    "neo4j".to_string()
}

fn default_neo4j_database() -> String {
    "neo4j".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(DependenciesConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        let mut config = DependenciesConfig::default();
        config.ollama.url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redacted_masks_password() {
        let mut config = DependenciesConfig::default();
        config.neo4j.password = "hunter2".to_string();

        let redacted = config.redacted();
        assert_eq!(redacted.neo4j.password, "***");
        // Original untouched
        assert_eq!(config.neo4j.password, "hunter2");
    }

    #[test]
    fn test_redacted_leaves_empty_password() {
        let config = DependenciesConfig::default();
        assert_eq!(config.redacted().neo4j.password, "");
    }
}
