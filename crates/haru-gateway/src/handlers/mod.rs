// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Response envelope: success bodies are `{"success": true, ...}`, error
//! bodies `{"success": false, "error": "..."}`. AI endpoints return 200
//! even when the pipeline fell back -- the only user-visible errors are
//! missing auth (401), missing required fields (400), and persistence
//! failures outside the AI pipeline (500).

pub mod ai;
pub mod analytics;
pub mod daily_tasks;
pub mod events;
pub mod goals;
pub mod reflections;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::server::AppState;

/// 200 with `{"success": true, "data": <data>}`.
pub fn ok_data<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(json!({"success": true, "data": data}))).into_response()
}

/// 400 with the standard error envelope.
pub fn bad_request(message: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, message)
}

/// 401 with the standard error envelope.
pub fn unauthorized(message: &str) -> Response {
    error_response(StatusCode::UNAUTHORIZED, message)
}

/// 404 with the standard error envelope.
pub fn not_found(message: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, message)
}

/// 500 with the standard error envelope. Reserved for failures outside the
/// AI pipeline (it never surfaces errors to callers).
pub fn internal_error(err: &haru_core::HaruError) -> Response {
    tracing::error!(error = %err, "request failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({"success": false, "error": message})),
    )
        .into_response()
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /health -- unauthenticated liveness probe.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"uptime_secs\":42"));
    }
}
