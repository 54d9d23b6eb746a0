// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Haru service.
//!
//! One writer connection behind tokio-rusqlite, WAL mode, embedded refinery
//! migrations, and typed query modules per table. The public surface is
//! [`SqliteStorage`], an implementation of `haru_core::StorageAdapter`.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
