//! Dependency probes
//!
//! Each external engine the gateway fronts (Qdrant, Neo4j, Ollama) is probed
//! through the same capability: report a health flag plus optional stats.
//! Probes never return errors; failures become unhealthy results carrying
//! the reason in their details.

mod neo4j;
mod ollama;
mod qdrant;
mod types;

pub use neo4j::Neo4jProbe;
pub use ollama::OllamaProbe;
pub use qdrant::QdrantProbe;
pub use types::HealthCheckResult;

use async_trait::async_trait;
use std::time::Duration;

/// A dependency that can report health and optional stats
#[async_trait]
pub trait DependencyProbe: Send + Sync {
    /// Service identifier ("qdrant", "neo4j", "ollama")
    fn name(&self) -> &str;

    /// Per-probe timeout the caller must enforce
    fn timeout(&self) -> Duration;

    /// Probe the dependency. Infallible by contract: any failure is
    /// reported as an unhealthy result, not an error.
    async fn check(&self) -> HealthCheckResult;
}
