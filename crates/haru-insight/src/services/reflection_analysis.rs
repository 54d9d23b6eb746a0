// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reflection analysis service.
//!
//! Analysis gates the onboarding flow, so it always succeeds by design:
//! total pipeline failure produces a fixed warm response, never an error.

use std::sync::Arc;

use haru_core::ProviderAdapter;

use crate::parser::parse_payload;
use crate::payload::ReflectionAnalysis;
use crate::retry::{run_with_fallback, PipelineOutcome};
use crate::{fallback, prompt};

/// Analyzes a single reflection entry.
pub struct ReflectionAnalysisService {
    provider: Arc<dyn ProviderAdapter>,
    max_attempts: u32,
}

impl ReflectionAnalysisService {
    pub fn new(provider: Arc<dyn ProviderAdapter>, max_attempts: u32) -> Self {
        Self {
            provider,
            max_attempts,
        }
    }

    /// Analyze `content` with optional self-reported mood and tags.
    pub async fn analyze(
        &self,
        content: &str,
        mood: Option<&str>,
        tags: &[String],
    ) -> PipelineOutcome<ReflectionAnalysis> {
        let prompt = prompt::reflection_analysis(content, mood, tags);

        run_with_fallback(
            "reflection_analysis",
            self.max_attempts,
            async |_attempt| {
                let raw = self.provider.generate(&prompt).await?;
                parse_payload::<ReflectionAnalysis>(&raw)
            },
            fallback::reflection_analysis,
        )
        .await
    }
}
