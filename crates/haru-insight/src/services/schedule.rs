// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schedule recommendation service.
//!
//! The fallback here is deliberately an EMPTY list, weaker than the other
//! services: recommendations imply calendar commitments, and fabricating
//! static ones would put invented obligations on a user's calendar.

use std::sync::Arc;

use haru_core::ProviderAdapter;

use crate::context::ContextAggregator;
use crate::parser::parse_payload;
use crate::payload::{Recommendation, ScheduleRecommendations};
use crate::prompt;
use crate::retry::{run_with_fallback, PipelineOutcome};

/// Suggests calendar entries from recent reflections.
pub struct ScheduleService {
    provider: Arc<dyn ProviderAdapter>,
    context: ContextAggregator,
    max_attempts: u32,
}

impl ScheduleService {
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

    /// Generate recommendations for the caller, optionally steered by a
    /// free-text request. Returns an empty list on total failure.
    pub async fn recommend(
        &self,
        user_id: &str,
        user_request: Option<&str>,
    ) -> PipelineOutcome<Vec<Recommendation>> {
        let context = self.context.gather(user_id).await;
        let prompt = prompt::schedule_recommendations(user_request, &context.render());

        let outcome = run_with_fallback(
            "schedule_recommendations",
            self.max_attempts,
            async |_attempt| {
                let raw = self.provider.generate(&prompt).await?;
                parse_payload::<ScheduleRecommendations>(&raw)
            },
            || ScheduleRecommendations {
                recommendations: Vec::new(),
            },
        )
        .await;

        outcome.map(|set| set.recommendations)
    }
}
