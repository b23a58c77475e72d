//! Neo4j graph store probe

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use crate::config::Neo4jConfig;
use crate::utils::error::Result;

use super::{DependencyProbe, HealthCheckResult};

const SERVICE_NAME: &str = "neo4j";

/// Probes Neo4j over its HTTP transaction API with a pair of count queries
pub struct Neo4jProbe {
    config: Neo4jConfig,
    client: reqwest::Client,
}

impl Neo4jProbe {
    /// Create a new Neo4j probe
    pub fn new(config: Neo4jConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { config, client })
    }

    fn tx_url(&self) -> String {
        format!("{}/db/{}/tx/commit", self.config.url, self.config.database)
    }

    /// Pull the single count value out of one statement result
    fn extract_count(body: &serde_json::Value, index: usize) -> Option<u64> {
        body.pointer(&format!("/results/{}/data/0/row/0", index))
            .and_then(|v| v.as_u64())
    }
}

#[async_trait]
impl DependencyProbe for Neo4jProbe {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    fn timeout(&self) -> Duration {
        self.config.timeout()
    }

    async fn check(&self) -> HealthCheckResult {
        let url = self.tx_url();
        let start_time = Instant::now();

        debug!("Probing neo4j at {}", url);

        let statements = serde_json::json!({
            "statements": [
                {"statement": "MATCH (n) RETURN count(n)"},
                {"statement": "MATCH ()-[r]->() RETURN count(r)"}
            ]
        });

        let mut request = self.client.post(&url).json(&statements);
        if !self.config.password.is_empty() {
            request = request.basic_auth(&self.config.username, Some(&self.config.password));
        }

        let response = match request.send().await {
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

        // The transaction API reports cypher failures in-band
        if let Some(errors) = body.get("errors").and_then(|e| e.as_array()) {
            if let Some(first) = errors.first() {
                let message = first
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("cypher error");
                return HealthCheckResult::unhealthy(
                    SERVICE_NAME,
                    start_time.elapsed(),
                    message.to_string(),
                );
            }
        }

        let mut details = HashMap::new();
        details.insert(
            "nodes".to_string(),
            serde_json::Value::Number(Self::extract_count(&body, 0).unwrap_or(0).into()),
        );
        details.insert(
            "relationships".to_string(),
            serde_json::Value::Number(Self::extract_count(&body, 1).unwrap_or(0).into()),
        );

        HealthCheckResult::healthy(SERVICE_NAME, start_time.elapsed(), details)
    }
}
