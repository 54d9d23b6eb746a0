// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Activity analytics, served through the TTL response cache.
//!
//! The cache key includes the caller identity; a shared key would leak one
//! user's summary to another.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use chrono::Days;
use serde_json::json;

use crate::auth::Identity;
use crate::handlers::internal_error;
use crate::server::AppState;

/// Days of history summarized.
const SUMMARY_WINDOW_DAYS: u64 = 30;

/// GET /v1/analytics/summary
pub async fn get_summary(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Response {
    let cache_key = format!("{}:/v1/analytics/summary", identity.user_id);
    if let Some(cached) = state.cache.get(&cache_key) {
        return cached_json(cached);
    }

    let today = chrono::Utc::now().date_naive();
    let since = today
        .checked_sub_days(Days::new(SUMMARY_WINDOW_DAYS))
        .unwrap_or(today);

    let reflections = match state
        .storage
        .reflections_since(&identity.user_id, since)
        .await
    {
        Ok(reflections) => reflections,
        Err(e) => return internal_error(&e),
    };
    let goals = match state.storage.recent_goals(&identity.user_id, 50).await {
        Ok(goals) => goals,
        Err(e) => return internal_error(&e),
    };
    let tasks = match state.storage.list_daily_tasks(&identity.user_id).await {
        Ok(tasks) => tasks,
        Err(e) => return internal_error(&e),
    };

    // BTreeMap keeps the emotion distribution stable across responses.
    let mut emotion_counts: BTreeMap<String, u32> = BTreeMap::new();
    for reflection in &reflections {
        if let Some(emotion) = reflection.emotion {
            *emotion_counts.entry(emotion.to_string()).or_default() += 1;
        }
    }

    let completed_tasks = tasks.iter().filter(|t| t.is_completed).count();
    let best_streak = tasks.iter().map(|t| t.streak_count).max().unwrap_or(0);

    let body = json!({
        "success": true,
        "data": {
            "windowDays": SUMMARY_WINDOW_DAYS,
            "reflectionCount": reflections.len(),
            "emotionCounts": emotion_counts,
            "goalCount": goals.len(),
            "dailyTaskTotal": tasks.len(),
            "dailyTaskCompleted": completed_tasks,
            "bestStreak": best_streak,
        }
    })
    .to_string();

    state.cache.put(cache_key, body.clone());
    cached_json(body)
}

fn cached_json(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}
