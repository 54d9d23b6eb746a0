// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goal progress aggregate reads and writes.

use chrono::NaiveDate;
use haru_core::HaruError;
use rusqlite::params;

use crate::database::Database;
use crate::models::GoalProgress;
use crate::queries::bad_column;

fn row_to_progress(row: &rusqlite::Row<'_>) -> Result<GoalProgress, rusqlite::Error> {
    let last_activity: Option<String> = row.get(3)?;
    let last_activity_date = last_activity
        .map(|s| s.parse::<NaiveDate>().map_err(|e| bad_column(3, e)))
        .transpose()?;
    Ok(GoalProgress {
        user_id: row.get(0)?,
        goal_id: row.get(1)?,
        progress_percentage: row.get(2)?,
        last_activity_date,
        daily_streak: row.get(4)?,
    })
}

/// Get the progress aggregate for one goal.
pub async fn get_progress(
    db: &Database,
    user_id: &str,
    goal_id: &str,
) -> Result<Option<GoalProgress>, HaruError> {
    let user_id = user_id.to_string();
    let goal_id = goal_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT user_id, goal_id, progress_percentage, last_activity_date, daily_streak
                 FROM goal_progress WHERE user_id = ?1 AND goal_id = ?2",
            )?;
            let result = stmt.query_row(params![user_id, goal_id], row_to_progress);
            match result {
                Ok(p) => Ok(Some(p)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or replace the progress aggregate.
pub async fn upsert_progress(db: &Database, progress: &GoalProgress) -> Result<(), HaruError> {
    let p = progress.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO goal_progress (user_id, goal_id, progress_percentage, last_activity_date, daily_streak)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (user_id, goal_id) DO UPDATE SET
                     progress_percentage = excluded.progress_percentage,
                     last_activity_date = excluded.last_activity_date,
                     daily_streak = excluded.daily_streak",
                params![
                    p.user_id,
                    p.goal_id,
                    p.progress_percentage,
                    p.last_activity_date.map(|d| d.to_string()),
                    p.daily_streak,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn upsert_then_get_round_trips() {
        let (db, _dir) = setup_db().await;
        let progress = GoalProgress {
            user_id: "user-1".to_string(),
            goal_id: "g1".to_string(),
            progress_percentage: 75,
            last_activity_date: Some("2026-03-10".parse().unwrap()),
            daily_streak: 4,
        };
        upsert_progress(&db, &progress).await.unwrap();

        let got = get_progress(&db, "user-1", "g1").await.unwrap().unwrap();
        assert_eq!(got, progress);
    }

    #[tokio::test]
    async fn upsert_overwrites_existing_row() {
        let (db, _dir) = setup_db().await;
        let mut progress = GoalProgress {
            user_id: "user-1".to_string(),
            goal_id: "g1".to_string(),
            progress_percentage: 50,
            last_activity_date: Some("2026-03-09".parse().unwrap()),
            daily_streak: 3,
        };
        upsert_progress(&db, &progress).await.unwrap();

        progress.progress_percentage = 75;
        progress.last_activity_date = Some("2026-03-10".parse().unwrap());
        progress.daily_streak = 4;
        upsert_progress(&db, &progress).await.unwrap();

        let got = get_progress(&db, "user-1", "g1").await.unwrap().unwrap();
        assert_eq!(got.progress_percentage, 75);
        assert_eq!(got.daily_streak, 4);
    }

    #[tokio::test]
    async fn missing_progress_returns_none() {
        let (db, _dir) = setup_db().await;
        let got = get_progress(&db, "user-1", "missing").await.unwrap();
        assert!(got.is_none());
    }
}
