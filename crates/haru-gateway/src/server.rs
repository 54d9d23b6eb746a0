// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state. `build_router` is split
//! from `start_server` so tests can drive the full stack in-process with
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use haru_core::{HaruError, StorageAdapter};
use haru_insight::InsightServices;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{auth_middleware, AuthConfig};
use crate::cache::ResponseCache;
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The five AI services.
    pub services: Arc<InsightServices>,
    /// Persistence backend for the CRUD routes.
    pub storage: Arc<dyn StorageAdapter>,
    /// TTL response cache for read-heavy endpoints.
    pub cache: Arc<ResponseCache>,
    /// Authentication configuration.
    pub auth: AuthConfig,
    /// Process start, for the health endpoint's uptime.
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(
        services: Arc<InsightServices>,
        storage: Arc<dyn StorageAdapter>,
        auth: AuthConfig,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            services,
            storage,
            cache: Arc::new(ResponseCache::new(cache_ttl)),
            auth,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Assemble the full router: public health route plus the authenticated
/// `/v1` API.
pub fn build_router(state: AppState) -> Router {
    let auth_state = state.auth.clone();

    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        // AI pipeline endpoints.
        .route("/v1/ai/goal-breakdown", post(handlers::ai::post_goal_breakdown))
        .route(
            "/v1/ai/schedule-recommendations",
            post(handlers::ai::post_schedule_recommendations),
        )
        .route(
            "/v1/ai/reflection-analysis",
            post(handlers::ai::post_reflection_analysis),
        )
        .route(
            "/v1/ai/reflection-questions",
            post(handlers::ai::post_reflection_questions),
        )
        .route("/v1/ai/just-do-it", get(handlers::ai::get_just_do_it))
        // Journal CRUD.
        .route(
            "/v1/reflections",
            post(handlers::reflections::post_reflection).get(handlers::reflections::list_reflections),
        )
        .route(
            "/v1/goals",
            post(handlers::goals::post_goal).get(handlers::goals::list_goals),
        )
        .route("/v1/goals/{id}", get(handlers::goals::get_goal))
        .route(
            "/v1/events",
            post(handlers::events::post_event).get(handlers::events::list_events),
        )
        .route(
            "/v1/daily-tasks",
            post(handlers::daily_tasks::post_daily_task)
                .get(handlers::daily_tasks::list_daily_tasks),
        )
        .route(
            "/v1/daily-tasks/{id}/complete",
            post(handlers::daily_tasks::complete_daily_task),
        )
        .route(
            "/v1/daily-tasks/{id}/uncomplete",
            post(handlers::daily_tasks::uncomplete_daily_task),
        )
        // Analytics (cached).
        .route("/v1/analytics/summary", get(handlers::analytics::get_summary))
        .route_layer(axum_middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the gateway HTTP server and serve until the task is cancelled.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), HaruError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HaruError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| HaruError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_debug_prints_address() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8026,
        };
        let rendered = format!("{config:?}");
        assert!(rendered.contains("127.0.0.1"));
        assert!(rendered.contains("8026"));
    }
}
