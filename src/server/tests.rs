//! Tests for server module
//!
//! This module contains all tests for the server components.

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::server::builder::ServerBuilder;
    use crate::server::server::HttpServer;

    #[tokio::test]
    async fn test_server_builder_requires_config() {
        let result = ServerBuilder::new().build().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_server_builder_with_config() {
        let config = Config::default();
        let server = ServerBuilder::new()
            .with_config(config)
            .build()
            .await
            .unwrap();
        assert_eq!(server.config().port, 8000);
    }

    #[tokio::test]
    async fn test_server_wires_all_probes() {
        let config = Config::default();
        let server = HttpServer::new(&config).await.unwrap();

        let score = server.state().scoring.system_score();
        let names: Vec<&str> = score
            .services
            .keys()
            .map(|name| name.as_str())
            .collect();
        assert!(names.contains(&"qdrant"));
        assert!(names.contains(&"neo4j"));
        assert!(names.contains(&"ollama"));
    }

    #[tokio::test]
    async fn test_server_starts_without_monitor_running() {
        let config = Config::default();
        let server = HttpServer::new(&config).await.unwrap();
        assert!(!server.state().diagnostics.is_monitoring());
    }
}
