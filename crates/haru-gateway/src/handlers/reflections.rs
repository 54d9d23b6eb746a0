// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reflection CRUD handlers.
//!
//! Intensity arrives in either representation (numeric or Korean ordinal)
//! and is normalized to the canonical 1..=5 here, before persistence.

use std::str::FromStr;

use axum::extract::{Query, State};
use axum::response::Response;
use axum::{Extension, Json};
use haru_core::types::{Emotion, Reflection};
use haru_insight::intensity;
use serde::Deserialize;

use crate::auth::Identity;
use crate::handlers::{bad_request, internal_error, ok_data};
use crate::server::AppState;

/// Request body for POST /v1/reflections.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReflectionRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub emotion: Option<String>,
    /// Number 1-5, numeric string, or Korean ordinal label.
    #[serde(default)]
    pub intensity: Option<serde_json::Value>,
}

/// POST /v1/reflections
pub async fn post_reflection(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateReflectionRequest>,
) -> Response {
    if body.title.trim().is_empty() {
        return bad_request("title is required");
    }
    if body.content.trim().is_empty() {
        return bad_request("content is required");
    }

    let emotion = match body.emotion.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(label) => match Emotion::from_str(label) {
            Ok(emotion) => Some(emotion),
            Err(_) => return bad_request(&format!("unknown emotion label `{label}`")),
        },
        None => None,
    };

    let intensity = match &body.intensity {
        Some(serde_json::Value::Null) | None => None,
        Some(serde_json::Value::Number(n)) => match n.as_u64().map(|n| n as u8) {
            Some(n) if (intensity::MIN..=intensity::MAX).contains(&n) => Some(n),
            _ => return bad_request("intensity must be between 1 and 5"),
        },
        Some(serde_json::Value::String(s)) => match intensity::normalize(s) {
            Some(n) => Some(n),
            None => return bad_request(&format!("unrecognized intensity `{s}`")),
        },
        Some(_) => return bad_request("intensity must be a number or string"),
    };

    let now = chrono::Utc::now().to_rfc3339();
    let reflection = Reflection {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: identity.user_id,
        title: body.title.trim().to_string(),
        content: body.content.trim().to_string(),
        emotion,
        intensity,
        ai_response: None,
        created_at: now.clone(),
        updated_at: now,
    };

    match state.storage.create_reflection(&reflection).await {
        Ok(()) => ok_data(reflection),
        Err(e) => internal_error(&e),
    }
}

/// Query parameters for GET /v1/reflections.
#[derive(Debug, Deserialize)]
pub struct ListReflectionsQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    20
}

/// GET /v1/reflections
pub async fn list_reflections(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<ListReflectionsQuery>,
) -> Response {
    match state
        .storage
        .recent_reflections(&identity.user_id, query.limit.min(100))
        .await
    {
        Ok(reflections) => ok_data(reflections),
        Err(e) => internal_error(&e),
    }
}
