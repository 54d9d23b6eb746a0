// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::OnceCell;
use tracing::debug;

use haru_config::model::StorageConfig;
use haru_core::types::{DailyTask, Goal, GoalProgress, Reflection, ScheduleEvent};
use haru_core::{AdapterType, HaruError, HealthStatus, PluginAdapter, StorageAdapter};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, HaruError> {
        self.db.get().ok_or_else(|| HaruError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, HaruError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HaruError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), HaruError> {
        let db = Database::open(&self.config.database_path).await?;
        self.db.set(db).map_err(|_| HaruError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), HaruError> {
        self.db()?.close().await
    }

    // --- Reflections ---

    async fn create_reflection(&self, reflection: &Reflection) -> Result<(), HaruError> {
        queries::reflections::create_reflection(self.db()?, reflection).await
    }

    async fn get_reflection(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<Reflection>, HaruError> {
        queries::reflections::get_reflection(self.db()?, user_id, id).await
    }

    async fn recent_reflections(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Reflection>, HaruError> {
        queries::reflections::recent_reflections(self.db()?, user_id, limit).await
    }

    async fn reflections_since(
        &self,
        user_id: &str,
        since: NaiveDate,
    ) -> Result<Vec<Reflection>, HaruError> {
        queries::reflections::reflections_since(self.db()?, user_id, since).await
    }

    async fn set_reflection_ai_response(
        &self,
        user_id: &str,
        id: &str,
        response: &str,
    ) -> Result<(), HaruError> {
        queries::reflections::set_ai_response(self.db()?, user_id, id, response).await
    }

    // --- Goals ---

    async fn create_goal(&self, goal: &Goal) -> Result<(), HaruError> {
        queries::goals::create_goal(self.db()?, goal).await
    }

    async fn get_goal(&self, user_id: &str, id: &str) -> Result<Option<Goal>, HaruError> {
        queries::goals::get_goal(self.db()?, user_id, id).await
    }

    async fn recent_goals(&self, user_id: &str, limit: u32) -> Result<Vec<Goal>, HaruError> {
        queries::goals::recent_goals(self.db()?, user_id, limit).await
    }

    async fn set_goal_progress(
        &self,
        user_id: &str,
        id: &str,
        progress: u8,
    ) -> Result<(), HaruError> {
        queries::goals::set_progress(self.db()?, user_id, id, progress).await
    }

    // --- Schedule events ---

    async fn create_event(&self, event: &ScheduleEvent) -> Result<(), HaruError> {
        queries::events::create_event(self.db()?, event).await
    }

    async fn events_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduleEvent>, HaruError> {
        queries::events::events_between(self.db()?, user_id, from, to).await
    }

    // --- Daily tasks ---

    async fn create_daily_task(&self, task: &DailyTask) -> Result<(), HaruError> {
        queries::daily_tasks::create_task(self.db()?, task).await
    }

    async fn get_daily_task(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<DailyTask>, HaruError> {
        queries::daily_tasks::get_task(self.db()?, user_id, id).await
    }

    async fn list_daily_tasks(&self, user_id: &str) -> Result<Vec<DailyTask>, HaruError> {
        queries::daily_tasks::list_tasks(self.db()?, user_id).await
    }

    async fn set_daily_task_completion(
        &self,
        user_id: &str,
        id: &str,
        completed: bool,
        today: NaiveDate,
    ) -> Result<Option<DailyTask>, HaruError> {
        queries::daily_tasks::set_completion(self.db()?, user_id, id, completed, today).await
    }

    async fn daily_task_counts(
        &self,
        user_id: &str,
        goal_id: &str,
    ) -> Result<(u32, u32), HaruError> {
        queries::daily_tasks::counts_for_goal(self.db()?, user_id, goal_id).await
    }

    // --- Goal progress ---

    async fn get_goal_progress(
        &self,
        user_id: &str,
        goal_id: &str,
    ) -> Result<Option<GoalProgress>, HaruError> {
        queries::goal_progress::get_progress(self.db()?, user_id, goal_id).await
    }

    async fn upsert_goal_progress(&self, progress: &GoalProgress) -> Result<(), HaruError> {
        queries::goal_progress::upsert_progress(self.db()?, progress).await
    }
}
