// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retry/fallback controller for the generation pipeline.
//!
//! Runs {build prompt -> generate -> parse -> validate} as an explicit
//! sequential loop with an immutable record per failed attempt. Attempts
//! are never raced: each one costs model quota, and the log line for
//! attempt N must be able to name the failure of attempt N-1. On
//! exhaustion the task-specific static fallback is returned; callers see
//! the same shape either way and can only tell via [`PipelineOutcome`]'s
//! flag, which exists for observability.

use tracing::warn;

use crate::error::PipelineError;

/// Immutable record of one failed attempt.
#[derive(Debug, Clone)]
pub struct AttemptFailure {
    pub attempt: u32,
    pub kind: &'static str,
    pub message: String,
}

/// Result of a pipeline run: either a validated payload or the fallback.
#[derive(Debug, Clone)]
pub struct PipelineOutcome<T> {
    pub value: T,
    /// True when the retry budget was exhausted and `value` is the static
    /// fallback. Never exposed in response bodies.
    pub used_fallback: bool,
    /// Number of attempts actually made.
    pub attempts: u32,
    /// One record per failed attempt, in order.
    pub failures: Vec<AttemptFailure>,
}

impl<T> PipelineOutcome<T> {
    /// Transform the carried value, preserving the outcome metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PipelineOutcome<U> {
        PipelineOutcome {
            value: f(self.value),
            used_fallback: self.used_fallback,
            attempts: self.attempts,
            failures: self.failures,
        }
    }
}

/// Run `attempt_fn` up to `max_attempts` times, falling back on exhaustion.
///
/// `attempt_fn` receives the 1-based attempt number. Attempts run strictly
/// one after another.
pub async fn run_with_fallback<T, F>(
    task: &str,
    max_attempts: u32,
    attempt_fn: F,
    fallback: impl FnOnce() -> T,
) -> PipelineOutcome<T>
where
    F: AsyncFn(u32) -> Result<T, PipelineError>,
{
    let mut failures = Vec::new();

    for attempt in 1..=max_attempts {
        match attempt_fn(attempt).await {
            Ok(value) => {
                return PipelineOutcome {
                    value,
                    used_fallback: false,
                    attempts: attempt,
                    failures,
                };
            }
            Err(e) => {
                warn!(task, attempt, kind = e.kind(), error = %e, "pipeline attempt failed");
                failures.push(AttemptFailure {
                    attempt,
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
        }
    }

    warn!(
        task,
        attempts = max_attempts,
        "retry budget exhausted, returning static fallback"
    );
    PipelineOutcome {
        value: fallback(),
        used_fallback: true,
        attempts: max_attempts,
        failures,
    }
}
