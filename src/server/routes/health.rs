//! Health check and version endpoints
//!
//! The basic and detailed health checks probe all three dependencies in
//! parallel (through the cache) and map the AND of their health flags to
//! 200 or 503. Probe failures surface as data, never as errors; only a
//! failure of the orchestration itself produces an `error` field.

use std::borrow::Cow;
use std::collections::HashMap;

use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::{debug, error};

use crate::server::state::AppState;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_check))
            .route("/detailed", web::get().to(detailed_health_check)),
    )
    .route("/version", web::get().to(version_info));
}

/// Basic health check endpoint
///
/// Binary verdict only: 200 when every dependency is healthy, 503
/// otherwise. Used by load balancers and container orchestrators.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    match state.diagnostics.check_all().await {
        Ok(aggregate) => {
            let body = HealthResponse {
                status: status_label(aggregate.healthy),
                timestamp: chrono::Utc::now(),
                version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
                uptime_seconds: state.diagnostics.uptime_seconds(),
                error: None,
            };
            Ok(respond(aggregate.healthy, &body))
        }
        Err(e) => {
            error!("Health check orchestration failed: {}", e);
            Ok(orchestration_failure(&state, e.to_string()))
        }
    }
}

/// Detailed health check endpoint
///
/// Same binary rule as the basic endpoint, with each dependency's full
/// probe result in the body.
async fn detailed_health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Detailed health check requested");

    match state.diagnostics.check_all().await {
        Ok(aggregate) => {
            let dependencies = aggregate
                .dependencies
                .into_iter()
                .map(|(name, result)| {
                    (
                        name,
                        DependencyStatus {
                            status: status_label(result.healthy),
                            response_time_ms: result.response_time_ms,
                            last_check: result.timestamp,
                            details: result.details,
                        },
                    )
                })
                .collect();

            let body = DetailedHealthResponse {
                status: status_label(aggregate.healthy),
                timestamp: chrono::Utc::now(),
                version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
                uptime_seconds: state.diagnostics.uptime_seconds(),
                dependencies,
                error: None,
            };
            Ok(respond(aggregate.healthy, &body))
        }
        Err(e) => {
            error!("Detailed health check orchestration failed: {}", e);
            Ok(orchestration_failure(&state, e.to_string()))
        }
    }
}

/// Version information endpoint
async fn version_info() -> HttpResponse {
    debug!("Version info requested");

    HttpResponse::Ok().json(VersionInfo {
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        build_time: Cow::Borrowed(env!("BUILD_TIME")),
        git_hash: Cow::Borrowed(env!("GIT_HASH")),
        rust_version: Cow::Borrowed(env!("RUST_VERSION")),
    })
}

fn status_label(healthy: bool) -> Cow<'static, str> {
    if healthy {
        Cow::Borrowed("healthy")
    } else {
        Cow::Borrowed("unhealthy")
    }
}

fn respond<T: serde::Serialize>(healthy: bool, body: &T) -> HttpResponse {
    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// The one case where a raw failure reason is shown verbatim: the health
/// orchestration itself failed before results could be aggregated.
fn orchestration_failure(state: &web::Data<AppState>, message: String) -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(HealthResponse {
        status: Cow::Borrowed("unhealthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        uptime_seconds: state.diagnostics.uptime_seconds(),
        error: Some(message),
    })
}

/// Basic health response body
#[derive(Debug, Clone, serde::Serialize)]
struct HealthResponse {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
    uptime_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Detailed health response body
#[derive(Debug, Clone, serde::Serialize)]
struct DetailedHealthResponse {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
    uptime_seconds: u64,
    dependencies: HashMap<String, DependencyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Per-dependency entry in the detailed response
#[derive(Debug, Clone, serde::Serialize)]
struct DependencyStatus {
    status: Cow<'static, str>,
    response_time_ms: u64,
    last_check: chrono::DateTime<chrono::Utc>,
    details: HashMap<String, serde_json::Value>,
}

/// Version information body
#[derive(Debug, Clone, serde::Serialize)]
struct VersionInfo {
    version: Cow<'static, str>,
    build_time: Cow<'static, str>,
    git_hash: Cow<'static, str>,
    rust_version: Cow<'static, str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(true), "healthy");
        assert_eq!(status_label(false), "unhealthy");
    }

    #[test]
    fn test_health_response_omits_absent_error() {
        let body = HealthResponse {
            status: Cow::Borrowed("healthy"),
            timestamp: chrono::Utc::now(),
            version: Cow::Borrowed("1.0.0"),
            uptime_seconds: 42,
            error: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["uptime_seconds"], 42);
    }
}
