// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Haru service.
//!
//! All records are plain DTOs owned by the persistence layer; services read
//! and write whole values, never live references. JSON field names use
//! camelCase because the same shapes cross the HTTP boundary and the
//! JSON-text `phases` column.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies the type of adapter in the plugin registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum AdapterType {
    Provider,
    Storage,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Fixed emotion label set attached to reflections.
///
/// Unknown labels are rejected at the boundary, not coerced.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Anxious,
    Excited,
    Calm,
    Confused,
    Grateful,
    Complex,
}

/// Difficulty rating on goal sub-tasks and daily tasks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Heuristic burnout classification, ordered so `max` escalates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString, Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BurnoutLevel {
    Low,
    Medium,
    High,
}

/// A user-authored journal entry with optional emotion/intensity metadata.
///
/// Immutable once analyzed except for the `ai_response` backfill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub emotion: Option<Emotion>,
    /// Canonical intensity, 1..=5. Korean ordinal labels and numeric strings
    /// are normalized before a Reflection is constructed.
    pub intensity: Option<u8>,
    pub ai_response: Option<String>,
    /// RFC 3339 UTC timestamp.
    pub created_at: String,
    pub updated_at: String,
}

/// A user-defined long-term objective decomposed into phases and tasks.
///
/// `phases` is persisted as JSON text in a single column; the stored JSON
/// must round-trip to the same `Vec<Phase>`. A decode failure on read is a
/// data-integrity error, not a user error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub timeframe: String,
    pub phases: Vec<Phase>,
    /// 0..=100, recomputed server-side from daily-task completion counts.
    pub progress: u8,
    pub created_at: String,
    pub updated_at: String,
}

/// An ordered stage of a goal containing a list of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub title: String,
    pub description: String,
    pub duration: String,
    #[serde(default)]
    pub completed: bool,
    pub tasks: Vec<GoalTask>,
}

/// A sub-task within a goal phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTask {
    pub title: String,
    pub description: String,
    pub time_estimate: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub completed: bool,
}

/// A recurring, checkable execution unit tied to a goal, tracked with a
/// completion streak. Distinct from [`GoalTask`], which is a plan item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTask {
    pub id: String,
    pub user_id: String,
    pub goal_id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub estimated_time: String,
    pub is_completed: bool,
    /// Set and cleared atomically with `is_completed`.
    pub completion_date: Option<NaiveDate>,
    pub streak_count: u32,
}

/// Derived per-goal aggregate recomputed whenever a daily task under that
/// goal is completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub user_id: String,
    pub goal_id: String,
    pub progress_percentage: u8,
    pub last_activity_date: Option<NaiveDate>,
    pub daily_streak: u32,
}

/// A calendar row owned by the user, either hand-created or accepted from a
/// schedule recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub date: NaiveDate,
    /// "HH:MM" local wall-clock times; the service does not interpret zones.
    pub start_time: String,
    pub end_time: String,
    pub category: String,
    pub memo: Option<String>,
}

/// Transient per-request burnout classification from recent reflections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnoutAssessment {
    pub level: BurnoutLevel,
    pub reason: String,
    pub patterns: Vec<String>,
}

/// A very-low-effort suggested activity (30s-2min) for low-motivation states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroAction {
    pub title: String,
    pub description: String,
    pub time_estimate: String,
    pub difficulty: Difficulty,
    pub category: String,
}
