//! Diagnostics endpoints
//!
//! Read-only JSON views over the aggregator: system stats, connectivity,
//! scores, trends, alerts, cache statistics, recommendations and a
//! downloadable report. No persisted side effects beyond cache and score
//! updates from the underlying probing.

use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use tracing::debug;

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;

/// Configure diagnostics routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/diagnostics")
            .route("/system", web::get().to(system_diagnostics))
            .route("/connectivity", web::get().to(connectivity))
            .route("/comprehensive", web::get().to(comprehensive))
            .route("/score", web::get().to(system_score))
            .route("/trends/{service}", web::get().to(service_trend))
            .route("/alerts", web::get().to(alerts))
            .route("/cache", web::get().to(cache_statistics))
            .route("/recommendations", web::get().to(recommendations))
            .route("/report", web::get().to(report)),
    );
}

/// Process stats plus current system score
async fn system_diagnostics(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("System diagnostics requested");
    let diagnostics = state.diagnostics.system_diagnostics().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(diagnostics)))
}

/// Per-service connectivity summary
async fn connectivity(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Connectivity diagnostics requested");
    let summary = state.diagnostics.connectivity().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}

/// The richest single diagnostic payload
async fn comprehensive(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Comprehensive health check requested");
    let payload = state.diagnostics.comprehensive().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(payload)))
}

/// Aggregate of the latest score per service
async fn system_score(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("System health score requested");
    Ok(HttpResponse::Ok().json(ApiResponse::success(state.scoring.system_score())))
}

#[derive(Debug, Deserialize)]
struct TrendQuery {
    /// Trailing window in hours; defaults to the retention window
    hours: Option<i64>,
}

/// Trend for one service over a trailing window
async fn service_trend(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<TrendQuery>,
) -> ActixResult<HttpResponse> {
    let service = path.into_inner();
    debug!("Trend requested for {}", service);

    let window = match query.hours {
        Some(hours) if hours <= 0 => {
            return Err(GatewayError::validation("hours must be positive").into());
        }
        Some(hours) => chrono::Duration::hours(hours),
        None => state.config.monitoring().scoring.retention(),
    };

    let trend = state.scoring.trend(&service, window);
    Ok(HttpResponse::Ok().json(ApiResponse::success(trend)))
}

/// Current alerts, freshly computed
async fn alerts(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Alerts requested");
    Ok(HttpResponse::Ok().json(ApiResponse::success(state.scoring.alerts())))
}

/// Health cache hit/miss statistics
async fn cache_statistics(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Cache statistics requested");
    Ok(HttpResponse::Ok().json(ApiResponse::success(state.cache.statistics())))
}

/// Canned remediation for current failures
async fn recommendations(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Troubleshooting recommendations requested");
    let recommendations = state.diagnostics.recommendations().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(recommendations)))
}

/// Downloadable diagnostic report
async fn report(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Diagnostic report requested");

    let report = state.diagnostics.report().await?;
    let body = serde_json::to_string_pretty(&report).map_err(GatewayError::from)?;
    let filename = format!(
        "diagnostic-report-{}.json",
        report.generated_at.format("%Y%m%dT%H%M%SZ")
    );

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(body))
}
