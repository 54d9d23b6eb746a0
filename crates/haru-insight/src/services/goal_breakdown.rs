// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goal breakdown service: decompose a goal into phases and tasks.

use std::sync::Arc;

use haru_core::ProviderAdapter;

use crate::context::ContextAggregator;
use crate::parser::parse_payload;
use crate::payload::GoalBreakdown;
use crate::retry::{run_with_fallback, PipelineOutcome};
use crate::{fallback, prompt};

/// Breaks a user goal into an actionable phase plan.
pub struct GoalBreakdownService {
    provider: Arc<dyn ProviderAdapter>,
    context: ContextAggregator,
    max_attempts: u32,
}

impl GoalBreakdownService {
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        context: ContextAggregator,
        max_attempts: u32,
    ) -> Self {
        Self {
            provider,
            context,
            max_attempts,
        }
    }

    /// Decompose `title`/`description` into phases. Falls back to a generic
    /// two-phase plan after the retry budget is spent.
    pub async fn breakdown(
        &self,
        user_id: &str,
        title: &str,
        description: Option<&str>,
    ) -> PipelineOutcome<GoalBreakdown> {
        // Context is read once and reused across attempts.
        let context = self.context.gather(user_id).await;
        let prompt = prompt::goal_breakdown(title, description, &context.render());

        run_with_fallback(
            "goal_breakdown",
            self.max_attempts,
            async |_attempt| {
                let raw = self.provider.generate(&prompt).await?;
                parse_payload::<GoalBreakdown>(&raw)
            },
            fallback::goal_breakdown,
        )
        .await
    }
}
