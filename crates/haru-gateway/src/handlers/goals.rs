// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goal CRUD handlers.
//!
//! The phase plan is persisted exactly as provided (usually straight from
//! the breakdown endpoint). Progress is always recomputed server-side from
//! daily-task completions; any client-supplied progress value is ignored.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::{Extension, Json};
use haru_core::types::{Goal, Phase};
use serde::Deserialize;

use crate::auth::Identity;
use crate::handlers::{bad_request, internal_error, not_found, ok_data};
use crate::server::AppState;

/// Request body for POST /v1/goals.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub timeframe: String,
    #[serde(default)]
    pub phases: Vec<Phase>,
}

/// POST /v1/goals
pub async fn post_goal(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateGoalRequest>,
) -> Response {
    if body.title.trim().is_empty() {
        return bad_request("title is required");
    }
    if body.timeframe.trim().is_empty() {
        return bad_request("timeframe is required");
    }

    let now = chrono::Utc::now().to_rfc3339();
    let goal = Goal {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: identity.user_id,
        title: body.title.trim().to_string(),
        description: body.description.unwrap_or_default(),
        timeframe: body.timeframe.trim().to_string(),
        phases: body.phases,
        progress: 0,
        created_at: now.clone(),
        updated_at: now,
    };

    match state.storage.create_goal(&goal).await {
        Ok(()) => ok_data(goal),
        Err(e) => internal_error(&e),
    }
}

/// Query parameters for GET /v1/goals.
#[derive(Debug, Deserialize)]
pub struct ListGoalsQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    20
}

/// GET /v1/goals
pub async fn list_goals(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<ListGoalsQuery>,
) -> Response {
    match state
        .storage
        .recent_goals(&identity.user_id, query.limit.min(100))
        .await
    {
        Ok(goals) => ok_data(goals),
        Err(e) => internal_error(&e),
    }
}

/// GET /v1/goals/{id}
pub async fn get_goal(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Response {
    match state.storage.get_goal(&identity.user_id, &id).await {
        Ok(Some(goal)) => ok_data(goal),
        Ok(None) => not_found("goal not found"),
        Err(e) => internal_error(&e),
    }
}
