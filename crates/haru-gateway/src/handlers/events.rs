// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schedule event CRUD handlers.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::{Extension, Json};
use chrono::NaiveDate;
use haru_core::types::ScheduleEvent;
use serde::Deserialize;

use crate::auth::Identity;
use crate::handlers::{bad_request, internal_error, ok_data};
use crate::server::AppState;

/// Request body for POST /v1/events.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    /// ISO "YYYY-MM-DD".
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
}

/// POST /v1/events
pub async fn post_event(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateEventRequest>,
) -> Response {
    if body.title.trim().is_empty() {
        return bad_request("title is required");
    }
    let Ok(date) = body.date.parse::<NaiveDate>() else {
        return bad_request("date must be YYYY-MM-DD");
    };
    if body.start_time.trim().is_empty() || body.end_time.trim().is_empty() {
        return bad_request("startTime and endTime are required");
    }

    let event = ScheduleEvent {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: identity.user_id,
        title: body.title.trim().to_string(),
        date,
        start_time: body.start_time.trim().to_string(),
        end_time: body.end_time.trim().to_string(),
        category: body.category.unwrap_or_else(|| "일반".to_string()),
        memo: body.memo,
    };

    match state.storage.create_event(&event).await {
        Ok(()) => ok_data(event),
        Err(e) => internal_error(&e),
    }
}

/// Query parameters for GET /v1/events.
#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub from: String,
    pub to: String,
}

/// GET /v1/events?from=YYYY-MM-DD&to=YYYY-MM-DD
pub async fn list_events(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<ListEventsQuery>,
) -> Response {
    let (Ok(from), Ok(to)) = (
        query.from.parse::<NaiveDate>(),
        query.to.parse::<NaiveDate>(),
    ) else {
        return bad_request("from and to must be YYYY-MM-DD");
    };
    if from > to {
        return bad_request("from must not be after to");
    }

    match state.storage.events_between(&identity.user_id, from, to).await {
        Ok(events) => ok_data(events),
        Err(e) => internal_error(&e),
    }
}
