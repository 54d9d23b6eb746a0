// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI endpoint handlers.
//!
//! Input validation happens before any model call; after that the pipeline
//! cannot fail from the caller's point of view, so every path here ends in
//! a 200 envelope.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::auth::Identity;
use crate::handlers::{bad_request, ok_data};
use crate::server::AppState;

/// Request body for POST /v1/ai/goal-breakdown.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalBreakdownRequest {
    pub goal_title: String,
    #[serde(default)]
    pub goal_description: Option<String>,
}

/// POST /v1/ai/goal-breakdown
pub async fn post_goal_breakdown(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<GoalBreakdownRequest>,
) -> Response {
    if body.goal_title.trim().is_empty() {
        return bad_request("goalTitle is required");
    }

    let outcome = state
        .services
        .goal_breakdown
        .breakdown(
            &identity.user_id,
            body.goal_title.trim(),
            body.goal_description.as_deref(),
        )
        .await;

    ok_data(outcome.value)
}

/// Request body for POST /v1/ai/schedule-recommendations.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(default)]
    pub user_request: Option<String>,
}

/// POST /v1/ai/schedule-recommendations
///
/// All body fields are optional; recommendations work from stored context
/// alone.
pub async fn post_schedule_recommendations(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<ScheduleRequest>,
) -> Response {
    let outcome = state
        .services
        .schedule
        .recommend(&identity.user_id, body.user_request.as_deref())
        .await;

    // This endpoint's envelope carries recommendations at the top level,
    // not under `data`.
    (
        axum::http::StatusCode::OK,
        Json(json!({"success": true, "recommendations": outcome.value})),
    )
        .into_response()
}

/// Request body for POST /v1/ai/reflection-analysis.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub reflection_content: String,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// POST /v1/ai/reflection-analysis
pub async fn post_reflection_analysis(
    State(state): State<AppState>,
    Extension(_identity): Extension<Identity>,
    Json(body): Json<AnalysisRequest>,
) -> Response {
    if body.reflection_content.trim().is_empty() {
        return bad_request("reflectionContent is required");
    }

    let outcome = state
        .services
        .reflection_analysis
        .analyze(
            body.reflection_content.trim(),
            body.mood.as_deref(),
            &body.tags,
        )
        .await;

    ok_data(outcome.value)
}

/// Request body for POST /v1/ai/reflection-questions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsRequest {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub recent_activities: Vec<String>,
}

/// POST /v1/ai/reflection-questions
pub async fn post_reflection_questions(
    State(state): State<AppState>,
    Extension(_identity): Extension<Identity>,
    Json(body): Json<QuestionsRequest>,
) -> Response {
    let outcome = state
        .services
        .questions
        .generate(
            body.mood.as_deref(),
            body.topic.as_deref(),
            &body.recent_activities,
        )
        .await;

    ok_data(json!({ "questions": outcome.value }))
}

/// GET /v1/ai/just-do-it
pub async fn get_just_do_it(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Response {
    let today = chrono::Utc::now().date_naive();
    let outcome = state
        .services
        .micro_action
        .just_do_it(&identity.user_id, today)
        .await;

    ok_data(outcome.value)
}
