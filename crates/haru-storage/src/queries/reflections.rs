// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reflection CRUD operations.

use std::str::FromStr;

use chrono::NaiveDate;
use haru_core::types::Emotion;
use haru_core::HaruError;
use rusqlite::params;

use crate::database::Database;
use crate::models::Reflection;
use crate::queries::bad_column;

const COLUMNS: &str =
    "id, user_id, title, content, emotion, intensity, ai_response, created_at, updated_at";

fn row_to_reflection(row: &rusqlite::Row<'_>) -> Result<Reflection, rusqlite::Error> {
    let emotion: Option<String> = row.get(4)?;
    let emotion = emotion
        .map(|s| Emotion::from_str(&s).map_err(|e| bad_column(4, e)))
        .transpose()?;
    Ok(Reflection {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        emotion,
        intensity: row.get(5)?,
        ai_response: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// Insert a new reflection.
pub async fn create_reflection(db: &Database, reflection: &Reflection) -> Result<(), HaruError> {
    let r = reflection.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO reflections (id, user_id, title, content, emotion, intensity, ai_response, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    r.id,
                    r.user_id,
                    r.title,
                    r.content,
                    r.emotion.map(|e| e.to_string()),
                    r.intensity,
                    r.ai_response,
                    r.created_at,
                    r.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get one reflection scoped by user.
pub async fn get_reflection(
    db: &Database,
    user_id: &str,
    id: &str,
) -> Result<Option<Reflection>, HaruError> {
    let user_id = user_id.to_string();
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM reflections WHERE user_id = ?1 AND id = ?2"
            ))?;
            let result = stmt.query_row(params![user_id, id], row_to_reflection);
            match result {
                Ok(r) => Ok(Some(r)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Most recent reflections for a user, newest first.
pub async fn recent_reflections(
    db: &Database,
    user_id: &str,
    limit: u32,
) -> Result<Vec<Reflection>, HaruError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM reflections
                 WHERE user_id = ?1 ORDER BY created_at DESC LIMIT ?2"
            ))?;
            let rows = stmt.query_map(params![user_id, limit], row_to_reflection)?;
            let mut reflections = Vec::new();
            for row in rows {
                reflections.push(row?);
            }
            Ok(reflections)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Reflections created on or after `since`, newest first.
///
/// RFC 3339 timestamps sort lexicographically, so the date prefix comparison
/// is a plain string compare.
pub async fn reflections_since(
    db: &Database,
    user_id: &str,
    since: NaiveDate,
) -> Result<Vec<Reflection>, HaruError> {
    let user_id = user_id.to_string();
    let since = since.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM reflections
                 WHERE user_id = ?1 AND created_at >= ?2 ORDER BY created_at DESC"
            ))?;
            let rows = stmt.query_map(params![user_id, since], row_to_reflection)?;
            let mut reflections = Vec::new();
            for row in rows {
                reflections.push(row?);
            }
            Ok(reflections)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Backfill the AI analysis onto an existing reflection.
pub async fn set_ai_response(
    db: &Database,
    user_id: &str,
    id: &str,
    response: &str,
) -> Result<(), HaruError> {
    let user_id = user_id.to_string();
    let id = id.to_string();
    let response = response.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE reflections
                 SET ai_response = ?1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE user_id = ?2 AND id = ?3",
                params![response, user_id, id],
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

    fn make_reflection(id: &str, user: &str, created_at: &str) -> Reflection {
        Reflection {
            id: id.to_string(),
            user_id: user.to_string(),
            title: "오늘의 회고".to_string(),
            content: "산책을 했더니 기분이 좋아졌다".to_string(),
            emotion: Some(Emotion::Calm),
            intensity: Some(4),
            ai_response: None,
            created_at: created_at.to_string(),
            updated_at: created_at.to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_get_round_trips() {
        let (db, _dir) = setup_db().await;
        let r = make_reflection("r1", "user-1", "2026-03-10T09:00:00.000Z");
        create_reflection(&db, &r).await.unwrap();

        let got = get_reflection(&db, "user-1", "r1").await.unwrap().unwrap();
        assert_eq!(got, r);
    }

    #[tokio::test]
    async fn get_is_scoped_by_user() {
        let (db, _dir) = setup_db().await;
        let r = make_reflection("r1", "user-1", "2026-03-10T09:00:00.000Z");
        create_reflection(&db, &r).await.unwrap();

        let other = get_reflection(&db, "user-2", "r1").await.unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn recent_orders_newest_first_and_limits() {
        let (db, _dir) = setup_db().await;
        for (id, ts) in [
            ("r1", "2026-03-08T09:00:00.000Z"),
            ("r2", "2026-03-09T09:00:00.000Z"),
            ("r3", "2026-03-10T09:00:00.000Z"),
        ] {
            create_reflection(&db, &make_reflection(id, "user-1", ts))
                .await
                .unwrap();
        }

        let recent = recent_reflections(&db, "user-1", 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, "r3");
        assert_eq!(recent[1].id, "r2");
    }

    #[tokio::test]
    async fn since_filters_by_date() {
        let (db, _dir) = setup_db().await;
        for (id, ts) in [
            ("old", "2026-02-20T09:00:00.000Z"),
            ("new", "2026-03-10T09:00:00.000Z"),
        ] {
            create_reflection(&db, &make_reflection(id, "user-1", ts))
                .await
                .unwrap();
        }

        let since = "2026-03-01".parse().unwrap();
        let recent = reflections_since(&db, "user-1", since).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, "new");
    }

    #[tokio::test]
    async fn ai_response_backfills() {
        let (db, _dir) = setup_db().await;
        let r = make_reflection("r1", "user-1", "2026-03-10T09:00:00.000Z");
        create_reflection(&db, &r).await.unwrap();

        set_ai_response(&db, "user-1", "r1", "따뜻한 분석 결과")
            .await
            .unwrap();
        let got = get_reflection(&db, "user-1", "r1").await.unwrap().unwrap();
        assert_eq!(got.ai_response.as_deref(), Some("따뜻한 분석 결과"));
        assert_ne!(got.updated_at, r.updated_at);
    }

    #[tokio::test]
    async fn reflection_without_emotion_round_trips() {
        let (db, _dir) = setup_db().await;
        let mut r = make_reflection("r-plain", "user-1", "2026-03-10T09:00:00.000Z");
        r.emotion = None;
        r.intensity = None;
        create_reflection(&db, &r).await.unwrap();

        let got = get_reflection(&db, "user-1", "r-plain")
            .await
            .unwrap()
            .unwrap();
        assert!(got.emotion.is_none());
        assert!(got.intensity.is_none());
    }
}
