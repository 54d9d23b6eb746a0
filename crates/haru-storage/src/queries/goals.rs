// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goal CRUD operations.
//!
//! The `phases` column holds a JSON-encoded `Vec<Phase>`. The stored text
//! must always round-trip; a decode failure on read surfaces as a storage
//! error (data corruption), never as an absent row.

use haru_core::types::Phase;
use haru_core::HaruError;
use rusqlite::params;

use crate::database::Database;
use crate::models::Goal;
use crate::queries::bad_column;

const COLUMNS: &str =
    "id, user_id, title, description, timeframe, phases, progress, created_at, updated_at";

fn row_to_goal(row: &rusqlite::Row<'_>) -> Result<Goal, rusqlite::Error> {
    let phases_json: String = row.get(5)?;
    let phases: Vec<Phase> =
        serde_json::from_str(&phases_json).map_err(|e| bad_column(5, e))?;
    Ok(Goal {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        timeframe: row.get(4)?,
        phases,
        progress: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// Insert a new goal, encoding its phase plan to JSON text.
pub async fn create_goal(db: &Database, goal: &Goal) -> Result<(), HaruError> {
    let g = goal.clone();
    let phases_json = serde_json::to_string(&g.phases).map_err(|e| HaruError::Storage {
        source: Box::new(e),
    })?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO goals (id, user_id, title, description, timeframe, phases, progress, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    g.id,
                    g.user_id,
                    g.title,
                    g.description,
                    g.timeframe,
                    phases_json,
                    g.progress,
                    g.created_at,
                    g.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get one goal scoped by user.
pub async fn get_goal(db: &Database, user_id: &str, id: &str) -> Result<Option<Goal>, HaruError> {
    let user_id = user_id.to_string();
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM goals WHERE user_id = ?1 AND id = ?2"
            ))?;
            let result = stmt.query_row(params![user_id, id], row_to_goal);
            match result {
                Ok(g) => Ok(Some(g)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Most recent goals for a user, newest first.
pub async fn recent_goals(db: &Database, user_id: &str, limit: u32) -> Result<Vec<Goal>, HaruError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM goals
                 WHERE user_id = ?1 ORDER BY created_at DESC LIMIT ?2"
            ))?;
            let rows = stmt.query_map(params![user_id, limit], row_to_goal)?;
            let mut goals = Vec::new();
            for row in rows {
                goals.push(row?);
            }
            Ok(goals)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Overwrite the denormalized progress column.
pub async fn set_progress(
    db: &Database,
    user_id: &str,
    id: &str,
    progress: u8,
) -> Result<(), HaruError> {
    let user_id = user_id.to_string();
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE goals
                 SET progress = ?1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE user_id = ?2 AND id = ?3",
                params![progress, user_id, id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
