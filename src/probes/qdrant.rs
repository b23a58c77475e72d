//! Qdrant vector store probe

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use crate::config::QdrantConfig;
use crate::utils::error::Result;

use super::{DependencyProbe, HealthCheckResult};

const SERVICE_NAME: &str = "qdrant";

/// Probes the Qdrant HTTP API via its collections listing
pub struct QdrantProbe {
    config: QdrantConfig,
    client: reqwest::Client,
}

impl QdrantProbe {
    /// Create a new Qdrant probe
    pub fn new(config: QdrantConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl DependencyProbe for QdrantProbe {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    fn timeout(&self) -> Duration {
        self.config.timeout()
    }

    async fn check(&self) -> HealthCheckResult {
        let url = format!("{}/collections", self.config.url);
        let start_time = Instant::now();

        debug!("Probing qdrant at {}", url);

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

        let collection_count = body
            .pointer("/result/collections")
            .and_then(|c| c.as_array())
            .map(|c| c.len())
            .unwrap_or(0);

        let mut details = HashMap::new();
        details.insert(
            "collections".to_string(),
            serde_json::Value::Number(collection_count.into()),
        );

        HealthCheckResult::healthy(SERVICE_NAME, start_time.elapsed(), details)
    }
}
