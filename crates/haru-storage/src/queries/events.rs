// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schedule event CRUD operations.

use chrono::NaiveDate;
use haru_core::HaruError;
use rusqlite::params;

use crate::database::Database;
use crate::models::ScheduleEvent;
use crate::queries::bad_column;

const COLUMNS: &str = "id, user_id, title, date, start_time, end_time, category, memo";

fn row_to_event(row: &rusqlite::Row<'_>) -> Result<ScheduleEvent, rusqlite::Error> {
    let date: String = row.get(3)?;
    let date: NaiveDate = date.parse().map_err(|e| bad_column(3, e))?;
    Ok(ScheduleEvent {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        date,
        start_time: row.get(4)?,
        end_time: row.get(5)?,
        category: row.get(6)?,
        memo: row.get(7)?,
    })
}

/// Insert a new schedule event.
pub async fn create_event(db: &Database, event: &ScheduleEvent) -> Result<(), HaruError> {
    let e = event.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO schedule_events (id, user_id, title, date, start_time, end_time, category, memo)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    e.id,
                    e.user_id,
                    e.title,
                    e.date.to_string(),
                    e.start_time,
                    e.end_time,
                    e.category,
                    e.memo,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Events within the inclusive date range, ordered by date then start time.
pub async fn events_between(
    db: &Database,
    user_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<ScheduleEvent>, HaruError> {
    let user_id = user_id.to_string();
    let from = from.to_string();
    let to = to.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM schedule_events
                 WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
                 ORDER BY date, start_time"
            ))?;
            let rows = stmt.query_map(params![user_id, from, to], row_to_event)?;
            let mut events = Vec::new();
            for row in rows {
                events.push(row?);
            }
            Ok(events)
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

    fn make_event(id: &str, date: &str, start: &str) -> ScheduleEvent {
        ScheduleEvent {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            title: "아침 스트레칭".to_string(),
            date: date.parse().unwrap(),
            start_time: start.to_string(),
            end_time: "09:30".to_string(),
            category: "건강".to_string(),
            memo: None,
        }
    }

    #[tokio::test]
    async fn range_query_is_inclusive_and_ordered() {
        let (db, _dir) = setup_db().await;
        create_event(&db, &make_event("e1", "2026-03-10", "09:00"))
            .await
            .unwrap();
        create_event(&db, &make_event("e2", "2026-03-10", "07:00"))
            .await
            .unwrap();
        create_event(&db, &make_event("e3", "2026-03-12", "09:00"))
            .await
            .unwrap();
        create_event(&db, &make_event("e4", "2026-03-20", "09:00"))
            .await
            .unwrap();

        let events = events_between(
            &db,
            "user-1",
            "2026-03-10".parse().unwrap(),
            "2026-03-12".parse().unwrap(),
        )
        .await
        .unwrap();

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e2", "e1", "e3"]);
    }

    #[tokio::test]
    async fn range_query_scoped_by_user() {
        let (db, _dir) = setup_db().await;
        let mut foreign = make_event("e1", "2026-03-10", "09:00");
        foreign.user_id = "someone-else".to_string();
        create_event(&db, &foreign).await.unwrap();

        let events = events_between(
            &db,
            "user-1",
            "2026-03-01".parse().unwrap(),
            "2026-03-31".parse().unwrap(),
        )
        .await
        .unwrap();
        assert!(events.is_empty());
    }
}
