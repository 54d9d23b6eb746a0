// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Micro-action ("just do it") service.
//!
//! Runs the burnout heuristic over the caller's recent reflections, then
//! asks the model for five burnout-appropriate micro-actions. The
//! assessment itself is pure local computation and never fails; only the
//! action generation goes through the retry/fallback controller.

use std::sync::Arc;

use chrono::NaiveDate;
use haru_core::types::{BurnoutLevel, MicroAction};
use haru_core::ProviderAdapter;
use serde::Serialize;

use crate::context::ContextAggregator;
use crate::parser::parse_payload;
use crate::payload::MicroActionSet;
use crate::retry::{run_with_fallback, PipelineOutcome};
use crate::{burnout, fallback, prompt};

/// Response shape of the just-do-it endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JustDoItPlan {
    pub burnout_level: BurnoutLevel,
    pub reason: String,
    pub micro_actions: Vec<MicroAction>,
}

/// Suggests burnout-aware micro-actions for the caller.
pub struct MicroActionService {
    provider: Arc<dyn ProviderAdapter>,
    context: ContextAggregator,
    max_attempts: u32,
}

impl MicroActionService {
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

    /// Assess burnout as of `today` and generate five micro-actions.
    pub async fn just_do_it(&self, user_id: &str, today: NaiveDate) -> PipelineOutcome<JustDoItPlan> {
        let context = self.context.gather(user_id).await;
        let assessment = burnout::assess(&context.recent_reflections, today);
        let prompt = prompt::micro_actions(&assessment, &context.interests, &context.render());

        let outcome = run_with_fallback(
            "micro_actions",
            self.max_attempts,
            async |_attempt| {
                let raw = self.provider.generate(&prompt).await?;
                parse_payload::<MicroActionSet>(&raw)
            },
            || MicroActionSet {
                micro_actions: fallback::micro_actions(),
            },
        )
        .await;

        outcome.map(|set| {
            let mut micro_actions = set.micro_actions;
            micro_actions.truncate(5);
            JustDoItPlan {
                burnout_level: assessment.level,
                reason: assessment.reason,
                micro_actions,
            }
        })
    }
}
