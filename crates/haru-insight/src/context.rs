// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context aggregation for prompt enrichment.
//!
//! Reads a user's recent reflections and goals once per request; the result
//! is reused across retry attempts (context does not change mid-request).
//! A persistence failure here is a [`PipelineError::Context`] internally,
//! but callers receive an empty context instead of an aborted pipeline.

use std::sync::Arc;

use haru_core::types::{Goal, Reflection};
use haru_core::StorageAdapter;
use tracing::warn;

use crate::error::PipelineError;

/// How many recent reflections feed prompts and the burnout heuristic.
const REFLECTION_LIMIT: u32 = 10;
/// How many recent goals feed prompts.
const GOAL_LIMIT: u32 = 3;
/// Reflection content is clipped to this many characters in rendered context.
const CONTENT_CLIP: usize = 120;

/// Interest extraction table: category -> trigger substrings.
///
/// Association list, NOT a map: "first 3 matches" follows this explicit
/// order, so reordering entries is a behavior change.
const INTEREST_CATEGORIES: &[(&str, &[&str])] = &[
    ("운동", &["운동", "헬스", "달리기", "조깅", "산책", "요가", "수영", "스트레칭"]),
    ("공부", &["공부", "학습", "독서", "책", "강의", "시험", "자격증"]),
    ("일", &["회사", "업무", "프로젝트", "회의", "출근", "야근", "동료"]),
    ("인간관계", &["친구", "가족", "모임", "만남", "연락", "대화"]),
    ("취미", &["취미", "그림", "음악", "게임", "영화", "요리", "여행", "사진"]),
    ("마음챙김", &["명상", "일기", "휴식", "기도", "호흡"]),
];

/// Aggregated per-user context for prompt embedding.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    /// Newest first.
    pub recent_reflections: Vec<Reflection>,
    /// Newest first.
    pub recent_goals: Vec<Goal>,
    /// At most 3 categories, in table order.
    pub interests: Vec<String>,
}

impl UserContext {
    /// The empty context used when aggregation fails or a user is new.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Renders the context as the free-text block prompts embed.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        if self.recent_goals.is_empty() {
            lines.push("등록된 목표 없음".to_string());
        } else {
            lines.push("진행 중인 목표:".to_string());
            for goal in &self.recent_goals {
                lines.push(format!("- {} (진행률 {}%)", goal.title, goal.progress));
            }
        }

        if self.recent_reflections.is_empty() {
            lines.push("최근 회고 없음".to_string());
        } else {
            lines.push("최근 회고:".to_string());
            for reflection in &self.recent_reflections {
                let clipped: String = reflection.content.chars().take(CONTENT_CLIP).collect();
                let emotion = reflection
                    .emotion
                    .map(|e| format!(" [{e}]"))
                    .unwrap_or_default();
                lines.push(format!("- {}{}: {}", reflection.title, emotion, clipped));
            }
        }

        if !self.interests.is_empty() {
            lines.push(format!("관심사: {}", self.interests.join(", ")));
        }

        lines.join("\n")
    }
}

/// Gathers per-user context from storage.
#[derive(Clone)]
pub struct ContextAggregator {
    storage: Arc<dyn StorageAdapter>,
}

impl ContextAggregator {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self { storage }
    }

    /// Gather context, degrading to [`UserContext::empty`] on storage
    /// failure. The failure is logged with its kind and never aborts the
    /// request.
    pub async fn gather(&self, user_id: &str) -> UserContext {
        match self.try_gather(user_id).await {
            Ok(context) => context,
            Err(e) => {
                warn!(user_id, kind = e.kind(), error = %e, "context aggregation failed, using empty context");
                UserContext::empty()
            }
        }
    }

    async fn try_gather(&self, user_id: &str) -> Result<UserContext, PipelineError> {
        let recent_reflections = self
            .storage
            .recent_reflections(user_id, REFLECTION_LIMIT)
            .await
            .map_err(|e| PipelineError::Context(e.to_string()))?;
        let recent_goals = self
            .storage
            .recent_goals(user_id, GOAL_LIMIT)
            .await
            .map_err(|e| PipelineError::Context(e.to_string()))?;

        let aggregate_text: String = recent_reflections
            .iter()
            .flat_map(|r| [r.title.as_str(), " ", r.content.as_str(), " "])
            .collect();
        let interests = extract_interests(&aggregate_text);

        Ok(UserContext {
            recent_reflections,
            recent_goals,
            interests,
        })
    }
}

/// Extract at most 3 interest categories from aggregated reflection text.
///
/// A category matches when any of its triggers is a substring of `text`.
/// Results follow the table's insertion order, not match frequency.
pub fn extract_interests(text: &str) -> Vec<String> {
    INTEREST_CATEGORIES
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|t| text.contains(t)))
        .take(3)
        .map(|(category, _)| category.to_string())
        .collect()
}
