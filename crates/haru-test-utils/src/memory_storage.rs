// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory `StorageAdapter` for pipeline and handler tests.
//!
//! Mirrors the SQLite adapter's observable behavior (user scoping, ordering,
//! completion-toggle semantics) on plain vectors. A failure switch lets
//! tests exercise the context aggregator's degrade-to-empty path.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use haru_core::progress::toggled_task_streak;
use haru_core::types::{DailyTask, Goal, GoalProgress, Reflection, ScheduleEvent};
use haru_core::{
    AdapterType, HaruError, HealthStatus, PluginAdapter, StorageAdapter,
};

/// In-memory storage backing for tests.
#[derive(Default)]
pub struct MemoryStorage {
    reflections: Mutex<Vec<Reflection>>,
    goals: Mutex<Vec<Goal>>,
    events: Mutex<Vec<ScheduleEvent>>,
    daily_tasks: Mutex<Vec<DailyTask>>,
    goal_progress: Mutex<Vec<GoalProgress>>,
    fail_reads: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read fail with a storage error until called with `false`.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<(), HaruError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(HaruError::Storage {
                source: "simulated read failure".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, HaruError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HaruError> {
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for MemoryStorage {
    async fn initialize(&self) -> Result<(), HaruError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), HaruError> {
        Ok(())
    }

    async fn create_reflection(&self, reflection: &Reflection) -> Result<(), HaruError> {
        self.reflections.lock().await.push(reflection.clone());
        Ok(())
    }

    async fn get_reflection(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<Reflection>, HaruError> {
        self.check_reads()?;
        Ok(self
            .reflections
            .lock()
            .await
            .iter()
            .find(|r| r.user_id == user_id && r.id == id)
            .cloned())
    }

    async fn recent_reflections(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Reflection>, HaruError> {
        self.check_reads()?;
        let mut matching: Vec<Reflection> = self
            .reflections
            .lock()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit as usize);
        Ok(matching)
    }

    async fn reflections_since(
        &self,
        user_id: &str,
        since: NaiveDate,
    ) -> Result<Vec<Reflection>, HaruError> {
        self.check_reads()?;
        let cutoff = since.to_string();
        let mut matching: Vec<Reflection> = self
            .reflections
            .lock()
            .await
            .iter()
            .filter(|r| r.user_id == user_id && r.created_at.as_str() >= cutoff.as_str())
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn set_reflection_ai_response(
        &self,
        user_id: &str,
        id: &str,
        response: &str,
    ) -> Result<(), HaruError> {
        let mut reflections = self.reflections.lock().await;
        if let Some(r) = reflections
            .iter_mut()
            .find(|r| r.user_id == user_id && r.id == id)
        {
            r.ai_response = Some(response.to_string());
        }
        Ok(())
    }

    async fn create_goal(&self, goal: &Goal) -> Result<(), HaruError> {
        self.goals.lock().await.push(goal.clone());
        Ok(())
    }

    async fn get_goal(&self, user_id: &str, id: &str) -> Result<Option<Goal>, HaruError> {
        self.check_reads()?;
        Ok(self
            .goals
            .lock()
            .await
            .iter()
            .find(|g| g.user_id == user_id && g.id == id)
            .cloned())
    }

    async fn recent_goals(&self, user_id: &str, limit: u32) -> Result<Vec<Goal>, HaruError> {
        self.check_reads()?;
        let mut matching: Vec<Goal> = self
            .goals
            .lock()
            .await
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit as usize);
        Ok(matching)
    }

    async fn set_goal_progress(
        &self,
        user_id: &str,
        id: &str,
        progress: u8,
    ) -> Result<(), HaruError> {
        let mut goals = self.goals.lock().await;
        if let Some(g) = goals
            .iter_mut()
            .find(|g| g.user_id == user_id && g.id == id)
        {
            g.progress = progress;
        }
        Ok(())
    }

    async fn create_event(&self, event: &ScheduleEvent) -> Result<(), HaruError> {
        self.events.lock().await.push(event.clone());
        Ok(())
    }

    async fn events_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduleEvent>, HaruError> {
        self.check_reads()?;
        let mut matching: Vec<ScheduleEvent> = self
            .events
            .lock()
            .await
            .iter()
            .filter(|e| e.user_id == user_id && e.date >= from && e.date <= to)
            .cloned()
            .collect();
        matching.sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));
        Ok(matching)
    }

    async fn create_daily_task(&self, task: &DailyTask) -> Result<(), HaruError> {
        self.daily_tasks.lock().await.push(task.clone());
        Ok(())
    }

    async fn get_daily_task(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<DailyTask>, HaruError> {
        self.check_reads()?;
        Ok(self
            .daily_tasks
            .lock()
            .await
            .iter()
            .find(|t| t.user_id == user_id && t.id == id)
            .cloned())
    }

    async fn list_daily_tasks(&self, user_id: &str) -> Result<Vec<DailyTask>, HaruError> {
        self.check_reads()?;
        let mut matching: Vec<DailyTask> = self
            .daily_tasks
            .lock()
            .await
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matching)
    }

    async fn set_daily_task_completion(
        &self,
        user_id: &str,
        id: &str,
        completed: bool,
        today: NaiveDate,
    ) -> Result<Option<DailyTask>, HaruError> {
        let mut tasks = self.daily_tasks.lock().await;
        let Some(task) = tasks
            .iter_mut()
            .find(|t| t.user_id == user_id && t.id == id)
        else {
            return Ok(None);
        };
        // Same-state toggles are no-ops, matching the SQL adapter.
        if task.is_completed != completed {
            task.is_completed = completed;
            task.completion_date = completed.then_some(today);
            task.streak_count = toggled_task_streak(task.streak_count, completed);
        }
        Ok(Some(task.clone()))
    }

    async fn daily_task_counts(
        &self,
        user_id: &str,
        goal_id: &str,
    ) -> Result<(u32, u32), HaruError> {
        self.check_reads()?;
        let tasks = self.daily_tasks.lock().await;
        let mut completed = 0;
        let mut total = 0;
        for task in tasks
            .iter()
            .filter(|t| t.user_id == user_id && t.goal_id == goal_id)
        {
            total += 1;
            if task.is_completed {
                completed += 1;
            }
        }
        Ok((completed, total))
    }

    async fn get_goal_progress(
        &self,
        user_id: &str,
        goal_id: &str,
    ) -> Result<Option<GoalProgress>, HaruError> {
        self.check_reads()?;
        Ok(self
            .goal_progress
            .lock()
            .await
            .iter()
            .find(|p| p.user_id == user_id && p.goal_id == goal_id)
            .cloned())
    }

    async fn upsert_goal_progress(&self, progress: &GoalProgress) -> Result<(), HaruError> {
        let mut rows = self.goal_progress.lock().await;
        if let Some(existing) = rows
            .iter_mut()
            .find(|p| p.user_id == progress.user_id && p.goal_id == progress.goal_id)
        {
            *existing = progress.clone();
        } else {
            rows.push(progress.clone());
        }
        Ok(())
    }
}
