//! Tests for the health check endpoints

use actix_web::{App, test, web};

use docgraph_gateway::server::routes;
use docgraph_gateway::server::state::AppState;

use crate::common;

async fn request(state: AppState, path: &str) -> (u16, serde_json::Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::health::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri(path).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    let body: serde_json::Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_web::test]
async fn test_health_all_dependencies_healthy() {
    let (status, body) = request(common::healthy_state(), "/health").await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert!(body["error"].is_null());
    assert!(body["uptime_seconds"].is_u64());
}

#[actix_web::test]
async fn test_health_one_dependency_down() {
    let (status, body) = request(common::degraded_state(), "/health").await;

    assert_eq!(status, 503);
    assert_eq!(body["status"], "unhealthy");
    // Probe failure is data, not an orchestration error
    assert!(body["error"].is_null());
}

#[actix_web::test]
async fn test_detailed_health_lists_all_dependencies() {
    let (status, body) = request(common::healthy_state(), "/health/detailed").await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");

    let deps = body["dependencies"].as_object().unwrap();
    assert_eq!(deps.len(), 3);
    for name in ["qdrant", "neo4j", "ollama"] {
        assert_eq!(deps[name]["status"], "healthy");
        assert!(deps[name]["response_time_ms"].is_u64());
    }
}

#[actix_web::test]
async fn test_detailed_health_flags_failing_dependency() {
    let (status, body) = request(common::degraded_state(), "/health/detailed").await;

    assert_eq!(status, 503);
    let deps = body["dependencies"].as_object().unwrap();
    assert_eq!(deps["neo4j"]["status"], "unhealthy");
    assert_eq!(deps["qdrant"]["status"], "healthy");
    assert_eq!(deps["ollama"]["status"], "healthy");
    assert_eq!(
        deps["neo4j"]["details"]["error"].as_str().unwrap(),
        "connection refused"
    );
}

#[actix_web::test]
async fn test_hanging_probe_reports_timeout_not_error() {
    let state = common::build_state(vec![
        std::sync::Arc::new(common::FakeProbe::healthy("qdrant")),
        std::sync::Arc::new(common::FakeProbe::hanging("neo4j")),
        std::sync::Arc::new(common::FakeProbe::healthy("ollama")),
    ]);

    let (status, body) = request(state, "/health/detailed").await;

    assert_eq!(status, 503);
    let deps = body["dependencies"].as_object().unwrap();
    assert_eq!(deps["neo4j"]["status"], "unhealthy");
    assert_eq!(deps["neo4j"]["details"]["timeout"], true);
}

#[actix_web::test]
async fn test_version_endpoint() {
    let (status, body) = request(common::healthy_state(), "/version").await;

    assert_eq!(status, 200);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["build_time"].is_string());
    assert!(body["git_hash"].is_string());
    assert!(body["rust_version"].is_string());
}
