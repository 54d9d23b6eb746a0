// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends (SQLite, etc.).
//!
//! Every operation is scoped by `user_id`; a caller can only reach its own
//! rows. Implementations must treat a row that fails to decode (e.g. a
//! corrupt `phases` JSON column) as a storage error, not an absent row.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::HaruError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{DailyTask, Goal, GoalProgress, Reflection, ScheduleEvent};

/// Adapter for storage and persistence backends.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, pragmas).
    async fn initialize(&self) -> Result<(), HaruError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), HaruError>;

    // --- Reflections ---

    async fn create_reflection(&self, reflection: &Reflection) -> Result<(), HaruError>;

    async fn get_reflection(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<Reflection>, HaruError>;

    /// Most recent reflections, newest first.
    async fn recent_reflections(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Reflection>, HaruError>;

    /// Reflections created on or after `since`, newest first.
    async fn reflections_since(
        &self,
        user_id: &str,
        since: NaiveDate,
    ) -> Result<Vec<Reflection>, HaruError>;

    /// Backfills the AI analysis onto an existing reflection.
    async fn set_reflection_ai_response(
        &self,
        user_id: &str,
        id: &str,
        response: &str,
    ) -> Result<(), HaruError>;

    // --- Goals ---

    async fn create_goal(&self, goal: &Goal) -> Result<(), HaruError>;

    async fn get_goal(&self, user_id: &str, id: &str) -> Result<Option<Goal>, HaruError>;

    /// Most recent goals, newest first.
    async fn recent_goals(&self, user_id: &str, limit: u32) -> Result<Vec<Goal>, HaruError>;

    /// Overwrites the denormalized progress column on a goal.
    async fn set_goal_progress(
        &self,
        user_id: &str,
        id: &str,
        progress: u8,
    ) -> Result<(), HaruError>;

    // --- Schedule events ---

    async fn create_event(&self, event: &ScheduleEvent) -> Result<(), HaruError>;

    /// Events with `from <= date <= to`, ordered by date then start time.
    async fn events_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduleEvent>, HaruError>;

    // --- Daily tasks ---

    async fn create_daily_task(&self, task: &DailyTask) -> Result<(), HaruError>;

    async fn get_daily_task(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<DailyTask>, HaruError>;

    async fn list_daily_tasks(&self, user_id: &str) -> Result<Vec<DailyTask>, HaruError>;

    /// Toggles completion on a daily task in a single UPDATE: sets or clears
    /// `completion_date` together with `is_completed`, and adjusts the task
    /// streak (increment on complete, decrement floored at 0 on un-complete).
    ///
    /// Returns the updated task, or `None` if no such task exists for the user.
    async fn set_daily_task_completion(
        &self,
        user_id: &str,
        id: &str,
        completed: bool,
        today: NaiveDate,
    ) -> Result<Option<DailyTask>, HaruError>;

    /// Returns `(completed, total)` daily-task counts for one goal.
    async fn daily_task_counts(
        &self,
        user_id: &str,
        goal_id: &str,
    ) -> Result<(u32, u32), HaruError>;

    // --- Goal progress ---

    async fn get_goal_progress(
        &self,
        user_id: &str,
        goal_id: &str,
    ) -> Result<Option<GoalProgress>, HaruError>;

    async fn upsert_goal_progress(&self, progress: &GoalProgress) -> Result<(), HaruError>;
}
