// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Haru service.
//!
//! Exposes the five AI endpoints plus journal/goal/event/daily-task CRUD
//! under `/v1`, guarded by a fail-closed identity middleware. AI endpoints
//! return 200 with either a validated result or the task-specific fallback;
//! 4xx/5xx are reserved for auth, input validation, and persistence
//! failures outside the pipeline.

pub mod auth;
pub mod cache;
pub mod handlers;
pub mod server;

pub use auth::{AuthConfig, Identity};
pub use cache::ResponseCache;
pub use server::{build_router, start_server, AppState, ServerConfig};
