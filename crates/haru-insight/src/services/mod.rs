// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain services, one per AI endpoint.
//!
//! Each service composes the same pipeline: aggregate context (at most
//! once), build a deterministic prompt, and run generate/parse/validate
//! through the shared retry controller with a task-specific fallback.

pub mod goal_breakdown;
pub mod micro_action;
pub mod questions;
pub mod reflection_analysis;
pub mod schedule;

use std::sync::Arc;

use haru_core::{ProviderAdapter, StorageAdapter};

use crate::context::ContextAggregator;

pub use goal_breakdown::GoalBreakdownService;
pub use micro_action::{JustDoItPlan, MicroActionService};
pub use questions::QuestionService;
pub use reflection_analysis::ReflectionAnalysisService;
pub use schedule::ScheduleService;

/// The five AI services behind the gateway, wired to one provider and one
/// storage backend.
pub struct InsightServices {
    pub goal_breakdown: GoalBreakdownService,
    pub schedule: ScheduleService,
    pub reflection_analysis: ReflectionAnalysisService,
    pub micro_action: MicroActionService,
    pub questions: QuestionService,
}

impl InsightServices {
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        storage: Arc<dyn StorageAdapter>,
        max_attempts: u32,
    ) -> Self {
        let context = ContextAggregator::new(storage);
        Self {
            goal_breakdown: GoalBreakdownService::new(
                provider.clone(),
                context.clone(),
                max_attempts,
            ),
            schedule: ScheduleService::new(provider.clone(), context.clone(), max_attempts),
            reflection_analysis: ReflectionAnalysisService::new(provider.clone(), max_attempts),
            micro_action: MicroActionService::new(provider.clone(), context, max_attempts),
            questions: QuestionService::new(provider, max_attempts),
        }
    }
}
