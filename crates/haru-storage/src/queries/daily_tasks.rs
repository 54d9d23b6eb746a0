// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily task CRUD and completion toggling.
//!
//! Completion state, completion date, and the per-task streak move together
//! in one UPDATE so a crash can never leave them disagreeing.

use std::str::FromStr;

use chrono::NaiveDate;
use haru_core::types::Difficulty;
use haru_core::HaruError;
use rusqlite::params;

use crate::database::Database;
use crate::models::DailyTask;
use crate::queries::bad_column;

const COLUMNS: &str = "id, user_id, goal_id, title, description, difficulty, estimated_time, is_completed, completion_date, streak_count";

fn row_to_task(row: &rusqlite::Row<'_>) -> Result<DailyTask, rusqlite::Error> {
    let difficulty: String = row.get(5)?;
    let difficulty = Difficulty::from_str(&difficulty).map_err(|e| bad_column(5, e))?;
    let completion_date: Option<String> = row.get(8)?;
    let completion_date = completion_date
        .map(|s| s.parse::<NaiveDate>().map_err(|e| bad_column(8, e)))
        .transpose()?;
    Ok(DailyTask {
        id: row.get(0)?,
        user_id: row.get(1)?,
        goal_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        difficulty,
        estimated_time: row.get(6)?,
        is_completed: row.get(7)?,
        completion_date,
        streak_count: row.get(9)?,
    })
}

/// Insert a new daily task.
pub async fn create_task(db: &Database, task: &DailyTask) -> Result<(), HaruError> {
    let t = task.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO daily_tasks (id, user_id, goal_id, title, description, difficulty, estimated_time, is_completed, completion_date, streak_count)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    t.id,
                    t.user_id,
                    t.goal_id,
                    t.title,
                    t.description,
                    t.difficulty.to_string(),
                    t.estimated_time,
                    t.is_completed,
                    t.completion_date.map(|d| d.to_string()),
                    t.streak_count,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get one daily task scoped by user.
pub async fn get_task(
    db: &Database,
    user_id: &str,
    id: &str,
) -> Result<Option<DailyTask>, HaruError> {
    let user_id = user_id.to_string();
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM daily_tasks WHERE user_id = ?1 AND id = ?2"
            ))?;
            let result = stmt.query_row(params![user_id, id], row_to_task);
            match result {
                Ok(t) => Ok(Some(t)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All daily tasks for a user.
pub async fn list_tasks(db: &Database, user_id: &str) -> Result<Vec<DailyTask>, HaruError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM daily_tasks WHERE user_id = ?1 ORDER BY id"
            ))?;
            let rows = stmt.query_map(params![user_id], row_to_task)?;
            let mut tasks = Vec::new();
            for row in rows {
                tasks.push(row?);
            }
            Ok(tasks)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Toggle completion in a single UPDATE.
///
/// `completion_date` is set to `today` on completion and cleared on
/// un-completion; the task streak increments on completion and decrements
/// (floored at 0) on un-completion. Toggling to the state the task is
/// already in is a no-op. Returns the row as it stands afterwards, or
/// `None` when the task does not exist for this user.
pub async fn set_completion(
    db: &Database,
    user_id: &str,
    id: &str,
    completed: bool,
    today: NaiveDate,
) -> Result<Option<DailyTask>, HaruError> {
    let user_str = user_id.to_string();
    let id_str = id.to_string();
    let date = completed.then(|| today.to_string());
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE daily_tasks
                 SET is_completed = ?1,
                     completion_date = ?2,
                     streak_count = CASE WHEN ?1 THEN streak_count + 1
                                         ELSE MAX(streak_count - 1, 0) END
                 WHERE user_id = ?3 AND id = ?4 AND is_completed != ?1",
                params![completed, date, user_str, id_str],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    get_task(db, user_id, id).await
}

/// `(completed, total)` daily-task counts for one goal.
pub async fn counts_for_goal(
    db: &Database,
    user_id: &str,
    goal_id: &str,
) -> Result<(u32, u32), HaruError> {
    let user_id = user_id.to_string();
    let goal_id = goal_id.to_string();
    db.connection()
        .call(move |conn| {
            let (completed, total): (u32, u32) = conn.query_row(
                "SELECT COALESCE(SUM(is_completed), 0), COUNT(*)
                 FROM daily_tasks WHERE user_id = ?1 AND goal_id = ?2",
                params![user_id, goal_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;
            Ok((completed, total))
        })
        .await
        .map_err(crate::database::map_tr_err)
}
