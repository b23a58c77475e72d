//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use tracing::{info, warn};

use crate::config::{Config, ServerConfig};
use crate::monitoring::{DiagnosticsAggregator, HealthCheckCache, HealthScoring};
use crate::probes::{DependencyProbe, Neo4jProbe, OllamaProbe, QdrantProbe};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server, wiring the probes, cache, scoring and
    /// aggregator from configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let dependencies = config.dependencies().clone();
        let probes: Vec<Arc<dyn DependencyProbe>> = vec![
            Arc::new(QdrantProbe::new(dependencies.qdrant.clone())?),
            Arc::new(Neo4jProbe::new(dependencies.neo4j.clone())?),
            Arc::new(OllamaProbe::new(dependencies.ollama.clone())?),
        ];
        let known_services = probes.iter().map(|p| p.name().to_string()).collect();

        let cache = Arc::new(HealthCheckCache::new());
        let scoring = Arc::new(HealthScoring::new(
            config.monitoring().scoring.clone(),
            config.monitoring().alerts.clone(),
            known_services,
        ));
        let diagnostics = Arc::new(DiagnosticsAggregator::new(
            config.monitoring().clone(),
            dependencies,
            probes,
            Arc::clone(&cache),
            Arc::clone(&scoring),
        ));

        let state = AppState::new(
            Arc::new(config.clone()),
            diagnostics,
            scoring,
            cache,
        );

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors_config = &state.config.server().cors;
        let mut cors = Cors::default();

        if cors_config.enabled {
            if cors_config.allows_all_origins() {
                cors = cors.allow_any_origin();
            } else {
                for origin in &cors_config.allowed_origins {
                    cors = cors.allowed_origin(origin);
                }
            }
            cors = cors
                .allowed_methods(vec![actix_web::http::Method::GET])
                .max_age(cors_config.max_age as usize);
        }

        App::new()
            .app_data(state)
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "docgraph-gateway")))
            .configure(routes::health::configure_routes)
            .configure(routes::diagnostics::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.worker_count();

        info!("Starting HTTP server on {}", bind_addr);

        let background = &self.state.config.monitoring().background;
        if background.enabled {
            self.state
                .diagnostics
                .start_background_monitor(background.interval());
            info!(
                "Background monitor running every {}s",
                background.interval_secs
            );
        } else {
            warn!("Background monitor disabled; trends only accrue from request traffic");
        }

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(workers)
            .bind(&bind_addr)
            .map_err(|e| {
                GatewayError::server(format!("Failed to bind to {}: {}", bind_addr, e))
            })?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
