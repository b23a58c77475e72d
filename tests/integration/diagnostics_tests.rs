//! Tests for the diagnostics endpoints

use actix_web::{App, test, web};

use docgraph_gateway::server::routes;
use docgraph_gateway::server::state::AppState;

use crate::common;

async fn request(state: AppState, path: &str) -> (u16, serde_json::Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::diagnostics::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri(path).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    let body: serde_json::Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_web::test]
async fn test_system_diagnostics_envelope() {
    let (status, body) = request(common::healthy_state(), "/diagnostics/system").await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert!(body["error"].is_null());
    assert!(body["data"]["uptime_seconds"].is_u64());
    assert!(body["data"]["resources"]["memory_total_bytes"].is_u64());
    assert!(body["data"]["score"].is_object());
}

#[actix_web::test]
async fn test_connectivity_reports_unreachable_service() {
    let (status, body) = request(common::degraded_state(), "/diagnostics/connectivity").await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["all_reachable"], false);
    assert_eq!(data["services"]["neo4j"]["reachable"], false);
    assert_eq!(data["services"]["qdrant"]["reachable"], true);
}

#[actix_web::test]
async fn test_comprehensive_combines_all_views() {
    let (status, body) = request(common::healthy_state(), "/diagnostics/comprehensive").await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["connectivity"]["all_reachable"], true);
    assert!(data["score"]["services"].is_object());
    assert!(data["trends"].is_object());
    assert!(data["alerts"].is_array());
}

#[actix_web::test]
async fn test_score_before_any_probe_is_unknown() {
    let (_, body) = request(common::healthy_state(), "/diagnostics/score").await;

    let data = &body["data"];
    assert!(data["overall_score"].is_null());
    assert_eq!(data["services"]["qdrant"]["status"], "unknown");
}

#[actix_web::test]
async fn test_score_after_probing() {
    let state = common::healthy_state();
    state.diagnostics.check_all().await.unwrap();

    let (_, body) = request(state, "/diagnostics/score").await;

    let data = &body["data"];
    // Fake probes answer in 5ms, well inside the fast threshold
    assert_eq!(data["overall_score"], 100.0);
    assert_eq!(data["services"]["neo4j"]["score"], 100);
}

#[actix_web::test]
async fn test_trend_rejects_non_positive_window() {
    let (status, _) = request(common::healthy_state(), "/diagnostics/trends/qdrant?hours=-2").await;
    assert_eq!(status, 400);
}

#[actix_web::test]
async fn test_trend_for_unrecorded_service_is_empty() {
    let (_, body) = request(common::healthy_state(), "/diagnostics/trends/qdrant").await;

    let data = &body["data"];
    assert_eq!(data["sample_count"], 0);
    assert_eq!(data["direction"], "stable");
}

#[actix_web::test]
async fn test_alerts_fire_for_down_dependency() {
    let state = common::degraded_state();
    state.diagnostics.check_all().await.unwrap();

    let (_, body) = request(state, "/diagnostics/alerts").await;

    let alerts = body["data"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["service_name"], "neo4j");
    assert_eq!(alerts[0]["severity"], "critical");
}

#[actix_web::test]
async fn test_cache_statistics_track_hits() {
    let state = common::healthy_state();
    state.diagnostics.check_all().await.unwrap();
    state.diagnostics.check_all().await.unwrap();

    let (_, body) = request(state, "/diagnostics/cache").await;

    let data = &body["data"];
    // First sweep misses all three, second sweep hits the fresh entries
    assert_eq!(data["misses"], 3);
    assert_eq!(data["hits"], 3);
    assert_eq!(data["entry_count"], 3);
}

#[actix_web::test]
async fn test_recommendations_for_unreachable_service() {
    let (_, body) = request(common::degraded_state(), "/diagnostics/recommendations").await;

    let recs = body["data"].as_array().unwrap();
    assert!(recs.iter().any(|r| {
        r["service_name"] == "neo4j" && !r["recommendation"].as_str().unwrap().is_empty()
    }));
}

#[actix_web::test]
async fn test_report_is_downloadable_and_redacted() {
    let mut config = docgraph_gateway::Config::default();
    config.gateway.dependencies.neo4j.password = "hunter2".to_string();
    let state = common::build_state_with(
        config,
        vec![
            std::sync::Arc::new(common::FakeProbe::healthy("qdrant")),
            std::sync::Arc::new(common::FakeProbe::healthy("neo4j")),
            std::sync::Arc::new(common::FakeProbe::healthy("ollama")),
        ],
    );

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::diagnostics::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/diagnostics/report")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"diagnostic-report-"));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(
        body["configuration"]["dependencies"]["neo4j"]["password"],
        "***"
    );
}
