// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per table.

pub mod daily_tasks;
pub mod events;
pub mod goal_progress;
pub mod goals;
pub mod reflections;

/// Wrap a decode failure on a row column as a rusqlite conversion error, so
/// corrupt rows surface as storage errors rather than panics or absent rows.
pub(crate) fn bad_column<E>(idx: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
}
