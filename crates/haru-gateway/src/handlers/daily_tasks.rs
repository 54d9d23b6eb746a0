// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily task handlers and the goal-progress recompute.
//!
//! Completing or un-completing a task is a read-modify-write against the
//! relational store. Concurrent completions of the same goal's tasks by
//! the same user race last-writer-wins; that is accepted for this
//! single-user, low-concurrency workload.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::{Extension, Json};
use chrono::NaiveDate;
use haru_core::progress::{next_streak, progress_percentage};
use haru_core::types::{DailyTask, Difficulty, GoalProgress};
use haru_core::{HaruError, StorageAdapter};
use serde::Deserialize;
use serde_json::json;

use crate::auth::Identity;
use crate::handlers::{bad_request, internal_error, not_found, ok_data};
use crate::server::AppState;

/// Request body for POST /v1/daily-tasks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDailyTaskRequest {
    pub goal_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub estimated_time: Option<String>,
}

/// POST /v1/daily-tasks
pub async fn post_daily_task(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateDailyTaskRequest>,
) -> Response {
    if body.goal_id.trim().is_empty() {
        return bad_request("goalId is required");
    }
    if body.title.trim().is_empty() {
        return bad_request("title is required");
    }

    let task = DailyTask {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: identity.user_id,
        goal_id: body.goal_id.trim().to_string(),
        title: body.title.trim().to_string(),
        description: body.description.unwrap_or_default(),
        difficulty: body.difficulty.unwrap_or(Difficulty::Easy),
        estimated_time: body.estimated_time.unwrap_or_else(|| "5분".to_string()),
        is_completed: false,
        completion_date: None,
        streak_count: 0,
    };

    match state.storage.create_daily_task(&task).await {
        Ok(()) => ok_data(task),
        Err(e) => internal_error(&e),
    }
}

/// GET /v1/daily-tasks
pub async fn list_daily_tasks(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Response {
    match state.storage.list_daily_tasks(&identity.user_id).await {
        Ok(tasks) => ok_data(tasks),
        Err(e) => internal_error(&e),
    }
}

/// POST /v1/daily-tasks/{id}/complete
pub async fn complete_daily_task(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Response {
    apply_completion(&state, &identity.user_id, &id, true).await
}

/// POST /v1/daily-tasks/{id}/uncomplete
pub async fn uncomplete_daily_task(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Response {
    apply_completion(&state, &identity.user_id, &id, false).await
}

async fn apply_completion(state: &AppState, user_id: &str, id: &str, completed: bool) -> Response {
    let today = chrono::Utc::now().date_naive();

    let task = match state
        .storage
        .set_daily_task_completion(user_id, id, completed, today)
        .await
    {
        Ok(Some(task)) => task,
        Ok(None) => return not_found("daily task not found"),
        Err(e) => return internal_error(&e),
    };

    match recompute_goal_progress(
        state.storage.as_ref(),
        user_id,
        &task.goal_id,
        completed,
        today,
    )
    .await
    {
        Ok(progress) => ok_data(json!({"task": task, "progress": progress})),
        Err(e) => internal_error(&e),
    }
}

/// Recompute the per-goal progress aggregate from daily-task counts.
///
/// The percentage is always recomputed from counts (never trusted from the
/// client). The daily streak only moves on completion: +1 when the last
/// activity was exactly yesterday, unchanged when already updated today,
/// reset to 1 otherwise. The denormalized `goals.progress` column is kept
/// in step with the aggregate.
pub async fn recompute_goal_progress(
    storage: &dyn StorageAdapter,
    user_id: &str,
    goal_id: &str,
    completed_now: bool,
    today: NaiveDate,
) -> Result<GoalProgress, HaruError> {
    let (completed, total) = storage.daily_task_counts(user_id, goal_id).await?;
    let percentage = progress_percentage(completed, total);

    let existing = storage.get_goal_progress(user_id, goal_id).await?;
    let (last_activity, streak) = existing
        .map(|p| (p.last_activity_date, p.daily_streak))
        .unwrap_or((None, 0));

    let (last_activity_date, daily_streak) = if completed_now {
        (Some(today), next_streak(last_activity, today, streak))
    } else {
        (last_activity, streak)
    };

    let progress = GoalProgress {
        user_id: user_id.to_string(),
        goal_id: goal_id.to_string(),
        progress_percentage: percentage,
        last_activity_date,
        daily_streak,
    };
    storage.upsert_goal_progress(&progress).await?;
    storage.set_goal_progress(user_id, goal_id, percentage).await?;

    Ok(progress)
}
