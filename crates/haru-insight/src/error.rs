// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline error taxonomy.
//!
//! All four kinds are caught and retried inside the retry controller; none
//! propagate to the HTTP layer. The distinction exists so logs can tell
//! "bad JSON" from "well-formed but semantically empty" from "the model
//! call itself failed".

use haru_core::HaruError;
use thiserror::Error;

/// Errors raised inside one build-prompt/generate/parse/validate cycle.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Transport or provider failure while generating text.
    #[error("generation error: {0}")]
    Generation(String),

    /// No well-formed structured region found in the model output.
    #[error("parse error: {0}")]
    Parse(String),

    /// Well-formed structure that violates the task's required-field contract.
    #[error("validation error: {0}")]
    Validation(String),

    /// Persistence read failure while aggregating context. Non-fatal: the
    /// aggregator degrades to empty context instead of aborting the pipeline.
    #[error("context error: {0}")]
    Context(String),
}

impl PipelineError {
    /// Stable short tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Generation(_) => "generation",
            PipelineError::Parse(_) => "parse",
            PipelineError::Validation(_) => "validation",
            PipelineError::Context(_) => "context",
        }
    }
}

impl From<HaruError> for PipelineError {
    fn from(e: HaruError) -> Self {
        PipelineError::Generation(e.to_string())
    }
}
