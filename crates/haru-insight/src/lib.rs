// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI pipeline for the Haru service.
//!
//! The flow shared by every AI endpoint:
//!
//! ```text
//! context (once) -> prompt -> generate -> parse -> validate
//!                     ^                              |
//!                     +--------- retry (<= 3) <------+
//!                                   |
//!                         exhausted: static fallback
//! ```
//!
//! Model output is untrusted text; structure is extracted by [`parser`],
//! checked by per-task [`payload`] contracts, and failures never reach the
//! HTTP layer -- the [`retry`] controller converts total failure into a
//! task-specific [`fallback`] payload.

pub mod burnout;
pub mod context;
pub mod error;
pub mod fallback;
pub mod intensity;
pub mod parser;
pub mod payload;
pub mod prompt;
pub mod retry;
pub mod services;

pub use error::PipelineError;
pub use retry::{AttemptFailure, PipelineOutcome};
pub use services::{InsightServices, JustDoItPlan};
