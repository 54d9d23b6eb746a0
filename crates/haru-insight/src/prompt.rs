// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt builders, one per task kind.
//!
//! Every builder is a pure function of its inputs: identical inputs produce
//! byte-identical prompts. That keeps the pipeline testable and leaves the
//! door open for response caching keyed on the prompt. Each prompt ends
//! with an explicit output contract (JSON shape in prose plus an example),
//! because the parser downstream only accepts a single JSON region.

use haru_core::types::BurnoutAssessment;

/// Shared instruction suffix demanding a single JSON block.
const JSON_ONLY: &str =
    "Respond with a single JSON object only. No markdown fences, no commentary \
before or after the JSON. All user-facing text inside the JSON must be warm, \
specific Korean (해요체).";

/// Prompt for decomposing a goal into phases and tasks.
pub fn goal_breakdown(title: &str, description: Option<&str>, context: &str) -> String {
    let description = description.unwrap_or("(설명 없음)");
    format!(
        r#"You are breaking a personal goal into a realistic, encouraging plan.

Goal title: {title}
Goal description: {description}

Recent activity of this user (may be empty):
{context}

Break the goal into 2-4 sequential phases. Each phase needs 2-4 small tasks
that fit into everyday life. Estimate an overall timeframe such as "2-3개월".
Difficulty must be one of "easy", "medium", "hard".

Output format:
{{
  "timeframe": "2-3개월",
  "phases": [
    {{
      "title": "기초 다지기",
      "description": "부담 없이 시작하는 단계예요",
      "duration": "2주",
      "tasks": [
        {{"title": "10분 걷기", "description": "저녁 식사 후 가볍게", "timeEstimate": "10분", "difficulty": "easy"}}
      ]
    }}
  ]
}}

{JSON_ONLY}"#
    )
}

/// Prompt for schedule recommendations from recent activity.
pub fn schedule_recommendations(user_request: Option<&str>, context: &str) -> String {
    let user_request = user_request.unwrap_or("(특별한 요청 없음)");
    format!(
        r#"You are suggesting calendar entries for the next few days based on a
user's recent reflections.

User request: {user_request}

Recent activity of this user (may be empty; if empty, suggest a gentle
starter routine):
{context}

Suggest 2-4 concrete schedule entries. Dates must be ISO "YYYY-MM-DD",
times 24-hour "HH:MM". Categories are short Korean nouns such as "건강",
"학습", "휴식". Each entry needs a one-sentence reasoning tied to the
user's activity.

Output format:
{{
  "recommendations": [
    {{
      "title": "아침 스트레칭",
      "date": "2026-03-12",
      "startTime": "07:30",
      "endTime": "07:45",
      "category": "건강",
      "reasoning": "아침에 몸이 무겁다는 기록이 있었어요"
    }}
  ]
}}

{JSON_ONLY}"#
    )
}

/// Prompt for analyzing one reflection entry.
pub fn reflection_analysis(content: &str, mood: Option<&str>, tags: &[String]) -> String {
    let mood = mood.unwrap_or("(선택 안 함)");
    let tags = if tags.is_empty() {
        "(없음)".to_string()
    } else {
        tags.join(", ")
    };
    format!(
        r#"You are gently analyzing one journal reflection.

Reflection:
---
{content}
---
Self-reported mood: {mood}
Tags: {tags}

Classify the dominant emotion as exactly one of: happy, sad, angry, anxious,
excited, calm, confused, grateful, complex. Rate intensity 1-5 (5 strongest).
Give 1-3 key insights, a warm 2-3 sentence response to the writer, 1-3 small
action suggestions, and a one-word emotion trend such as "안정적" or "상승".

Output format:
{{
  "emotion": "calm",
  "intensity": 3,
  "keyInsights": ["산책이 기분 전환에 도움이 됐어요"],
  "response": "오늘 하루를 차분히 돌아보셨네요. ...",
  "actionSuggestions": ["내일도 10분만 걸어보기"],
  "emotionTrend": "안정적"
}}

{JSON_ONLY}"#
    )
}

/// Prompt for burnout-aware micro-actions ("just do it").
pub fn micro_actions(
    assessment: &BurnoutAssessment,
    interests: &[String],
    context: &str,
) -> String {
    let interests = if interests.is_empty() {
        "(파악된 관심사 없음)".to_string()
    } else {
        interests.join(", ")
    };
    let patterns = if assessment.patterns.is_empty() {
        "(특이 패턴 없음)".to_string()
    } else {
        assessment.patterns.join(", ")
    };
    format!(
        r#"You are suggesting five tiny actions for a user with low energy.
Every action must take between 30 seconds and 2 minutes, require no
preparation, and be doable right now.

Current burnout level: {level}
Reason: {reason}
Observed patterns: {patterns}
User interests: {interests}

Recent activity of this user (may be empty):
{context}

Suggest exactly 5 micro-actions. `difficulty` is always "easy". `category`
is a short Korean noun such as "몸 풀기", "마음 돌보기", "정리", "연결",
"환기". The lower the user's energy, the smaller the actions should be.

Output format:
{{
  "microActions": [
    {{
      "title": "창문 열고 숨 쉬기",
      "description": "창문을 열고 깊게 세 번 숨 쉬어요",
      "timeEstimate": "30초",
      "difficulty": "easy",
      "category": "환기"
    }}
  ]
}}

{JSON_ONLY}"#,
        level = assessment.level,
        reason = assessment.reason,
    )
}

/// Prompt for generating reflection starter questions.
pub fn reflection_questions(
    mood: Option<&str>,
    topic: Option<&str>,
    recent_activities: &[String],
) -> String {
    let mood = mood.unwrap_or("(선택 안 함)");
    let topic = topic.unwrap_or("(자유 주제)");
    let activities = if recent_activities.is_empty() {
        "(없음)".to_string()
    } else {
        recent_activities.join(", ")
    };
    format!(
        r#"You are writing journal prompts that help someone start reflecting.

Today's mood: {mood}
Requested topic: {topic}
Recent activities: {activities}

Write exactly 5 open-ended questions in Korean. Questions must be specific
enough to answer in 2-3 sentences, never yes/no, and gentle in tone.

Output format:
{{
  "questions": [
    "오늘 가장 마음이 편안했던 순간은 언제였나요?"
  ]
}}

{JSON_ONLY}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use haru_core::types::BurnoutLevel;

    #[test]
    fn builders_are_deterministic() {
        let a = goal_breakdown("건강해지기", Some("체력 기르기"), "최근 회고 없음");
        let b = goal_breakdown("건강해지기", Some("체력 기르기"), "최근 회고 없음");
        assert_eq!(a, b);

        let tags = vec!["운동".to_string()];
        let a = reflection_analysis("오늘은 산책을 했다", Some("calm"), &tags);
        let b = reflection_analysis("오늘은 산책을 했다", Some("calm"), &tags);
        assert_eq!(a, b);
    }

    #[test]
    fn goal_prompt_embeds_inputs_and_contract() {
        let prompt = goal_breakdown("건강해지기", None, "ctx-marker");
        assert!(prompt.contains("건강해지기"));
        assert!(prompt.contains("(설명 없음)"));
        assert!(prompt.contains("ctx-marker"));
        assert!(prompt.contains("\"timeframe\""));
        assert!(prompt.contains("single JSON object"));
    }

    #[test]
    fn schedule_prompt_carries_user_request() {
        let prompt = schedule_recommendations(Some("주말엔 쉬고 싶어요"), "");
        assert!(prompt.contains("주말엔 쉬고 싶어요"));
        assert!(prompt.contains("\"recommendations\""));
    }

    #[test]
    fn micro_action_prompt_reflects_assessment() {
        let assessment = BurnoutAssessment {
            level: BurnoutLevel::High,
            reason: "일주일 넘게 회고가 없어요".to_string(),
            patterns: vec!["최근 일주일 회고 없음".to_string()],
        };
        let prompt = micro_actions(&assessment, &["운동".to_string()], "");
        assert!(prompt.contains("high"));
        assert!(prompt.contains("일주일 넘게 회고가 없어요"));
        assert!(prompt.contains("운동"));
        assert!(prompt.contains("\"microActions\""));
    }

    #[test]
    fn question_prompt_defaults_read_naturally() {
        let prompt = reflection_questions(None, None, &[]);
        assert!(prompt.contains("(자유 주제)"));
        assert!(prompt.contains("\"questions\""));
    }
}
