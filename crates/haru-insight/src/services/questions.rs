// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reflection-question generation service.
//!
//! The response contract is exactly five questions: short model output is
//! topped up from the generic set, long output is truncated.

use std::sync::Arc;

use haru_core::ProviderAdapter;

use crate::parser::parse_payload;
use crate::payload::QuestionSet;
use crate::retry::{run_with_fallback, PipelineOutcome};
use crate::{fallback, prompt};

/// How many questions every response carries.
const QUESTION_COUNT: usize = 5;

/// Generates reflection starter questions.
pub struct QuestionService {
    provider: Arc<dyn ProviderAdapter>,
    max_attempts: u32,
}

impl QuestionService {
    pub fn new(provider: Arc<dyn ProviderAdapter>, max_attempts: u32) -> Self {
        Self {
            provider,
            max_attempts,
        }
    }

    /// Generate exactly five questions for the given mood/topic/activities.
    pub async fn generate(
        &self,
        mood: Option<&str>,
        topic: Option<&str>,
        recent_activities: &[String],
    ) -> PipelineOutcome<Vec<String>> {
        let prompt = prompt::reflection_questions(mood, topic, recent_activities);

        let outcome = run_with_fallback(
            "reflection_questions",
            self.max_attempts,
            async |_attempt| {
                let raw = self.provider.generate(&prompt).await?;
                parse_payload::<QuestionSet>(&raw)
            },
            || QuestionSet {
                questions: fallback::questions(),
            },
        )
        .await;

        outcome.map(|set| pad_to_five(set.questions))
    }
}

/// Normalize to exactly [`QUESTION_COUNT`] questions, topping up from the
/// generic set without duplicating entries already present.
fn pad_to_five(mut questions: Vec<String>) -> Vec<String> {
    questions.retain(|q| !q.trim().is_empty());
    questions.truncate(QUESTION_COUNT);
    if questions.len() < QUESTION_COUNT {
        for generic in fallback::questions() {
            if questions.len() == QUESTION_COUNT {
                break;
            }
            if !questions.contains(&generic) {
                questions.push(generic);
            }
        }
    }
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use haru_test_utils::MockProvider;

    #[tokio::test]
    async fn five_questions_pass_through() {
        let response = r#"{"questions": ["q1?", "q2?", "q3?", "q4?", "q5?"]}"#;
        let service = QuestionService::new(
            Arc::new(MockProvider::with_responses(vec![response])),
            3,
        );
        let outcome = service.generate(Some("happy"), None, &[]).await;
        assert!(!outcome.used_fallback);
        assert_eq!(outcome.value, vec!["q1?", "q2?", "q3?", "q4?", "q5?"]);
    }

    #[tokio::test]
    async fn short_output_is_topped_up_to_five() {
        let response = r#"{"questions": ["오늘 뭐가 제일 좋았나요?", "누구와 시간을 보냈나요?"]}"#;
        let service = QuestionService::new(
            Arc::new(MockProvider::with_responses(vec![response])),
            3,
        );
        let outcome = service.generate(None, None, &[]).await;
        assert_eq!(outcome.value.len(), 5);
        assert_eq!(outcome.value[0], "오늘 뭐가 제일 좋았나요?");
    }

    #[tokio::test]
    async fn long_output_is_truncated_to_five() {
        let response = r#"{"questions": ["1", "2", "3", "4", "5", "6", "7"]}"#;
        let service = QuestionService::new(
            Arc::new(MockProvider::with_responses(vec![response])),
            3,
        );
        let outcome = service.generate(None, None, &[]).await;
        assert_eq!(outcome.value.len(), 5);
    }

    #[tokio::test]
    async fn total_failure_returns_the_five_generic_questions() {
        let service = QuestionService::new(Arc::new(MockProvider::failing()), 3);
        let outcome = service.generate(None, Some("가족"), &[]).await;
        assert!(outcome.used_fallback);
        assert_eq!(outcome.value, fallback::questions());
    }
}
