//! Ollama LLM runtime probe

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use crate::config::OllamaConfig;
use crate::utils::error::Result;

use super::{DependencyProbe, HealthCheckResult};

const SERVICE_NAME: &str = "ollama";

/// Probes the Ollama HTTP API via its model listing
pub struct OllamaProbe {
    config: OllamaConfig,
    client: reqwest::Client,
}

impl OllamaProbe {
    /// Create a new Ollama probe
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl DependencyProbe for OllamaProbe {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    fn timeout(&self) -> Duration {
        self.config.timeout()
    }

    async fn check(&self) -> HealthCheckResult {
        let url = format!("{}/api/tags", self.config.url);
        let start_time = Instant::now();

        debug!("Probing ollama at {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                return HealthCheckResult::unhealthy(
                    SERVICE_NAME,
                    start_time.elapsed(),
                    e.to_string(),
                );
            }
        };

        if !response.status().is_success() {
            return HealthCheckResult::unhealthy(
                SERVICE_NAME,
                start_time.elapsed(),
                format!("HTTP {}", response.status()),
            );
        }

        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                return HealthCheckResult::unhealthy(
                    SERVICE_NAME,
                    start_time.elapsed(),
                    format!("malformed response: {}", e),
                );
            }
        };

        let models: Vec<serde_json::Value> = body
            .get("models")
            .and_then(|m| m.as_array())
            .map(|models| {
                models
                    .iter()
                    .filter_map(|m| m.get("name").cloned())
                    .collect()
            })
            .unwrap_or_default();

        let mut details = HashMap::new();
        details.insert(
            "model_count".to_string(),
            serde_json::Value::Number(models.len().into()),
        );
        details.insert("models".to_string(), serde_json::Value::Array(models));

        HealthCheckResult::healthy(SERVICE_NAME, start_time.elapsed(), details)
    }
}
