// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Burnout heuristic over recent reflections.
//!
//! Rules run in priority order; the strongest signal sets the level, but
//! every fired signal lands in `patterns`:
//!
//! 1. No reflections in the last 3 days -> look at the last 7: zero means
//!    `high`, exactly one means `medium`.
//! 2. At least 2 of the 3 most recent reflections carry a negative emotion
//!    -> escalate to at least `medium`.
//! 3. The concatenated text of the 5 most recent reflections contains 2 or
//!    more DISTINCT negative keywords (distinct keywords, not occurrence
//!    count) -> escalate to at least `medium`.
//! 4. Nothing fired -> `low` with a generic reason.

use chrono::{DateTime, Days, NaiveDate};
use haru_core::types::{BurnoutAssessment, BurnoutLevel, Emotion, Reflection};

/// Emotions counted as negative by rule 2.
const NEGATIVE_EMOTIONS: [Emotion; 4] = [
    Emotion::Sad,
    Emotion::Angry,
    Emotion::Anxious,
    Emotion::Complex,
];

/// Keyword list scanned by rule 3.
const NEGATIVE_KEYWORDS: &[&str] = &[
    "피곤",
    "지쳤",
    "지친",
    "힘들",
    "무기력",
    "번아웃",
    "스트레스",
    "포기",
    "우울",
    "불안",
    "tired",
    "exhausted",
    "burnout",
    "stressed",
    "overwhelmed",
];

/// Assess burnout from recent reflections, newest first.
///
/// `reflections` is expected to be the most recent entries in descending
/// creation order, as returned by the context aggregator.
pub fn assess(reflections: &[Reflection], today: NaiveDate) -> BurnoutAssessment {
    let mut level = BurnoutLevel::Low;
    let mut reason: Option<String> = None;
    let mut patterns = Vec::new();

    // Rule 1: reflection frequency.
    let last_3_days = count_within(reflections, today, 3);
    if last_3_days == 0 {
        match count_within(reflections, today, 7) {
            0 => {
                level = BurnoutLevel::High;
                reason = Some("일주일 넘게 회고가 없어요".to_string());
                patterns.push("최근 일주일 회고 없음".to_string());
            }
            1 => {
                level = level.max(BurnoutLevel::Medium);
                reason = Some("요즘 회고가 뜸해졌어요".to_string());
                patterns.push("회고 빈도 감소".to_string());
            }
            _ => {}
        }
    }

    // Rule 2: negative emotions among the 3 most recent entries.
    let negative_recent = reflections
        .iter()
        .take(3)
        .filter(|r| r.emotion.is_some_and(|e| NEGATIVE_EMOTIONS.contains(&e)))
        .count();
    if negative_recent >= 2 {
        level = level.max(BurnoutLevel::Medium);
        if reason.is_none() {
            reason = Some("최근 기록에 부정적인 감정이 이어지고 있어요".to_string());
        }
        patterns.push("부정적 감정 반복".to_string());
    }

    // Rule 3: distinct negative keywords across the 5 most recent texts.
    let aggregate: String = reflections
        .iter()
        .take(5)
        .flat_map(|r| [r.title.as_str(), " ", r.content.as_str(), " "])
        .collect();
    let distinct_hits = NEGATIVE_KEYWORDS
        .iter()
        .filter(|kw| aggregate.contains(**kw))
        .count();
    if distinct_hits >= 2 {
        level = level.max(BurnoutLevel::Medium);
        if reason.is_none() {
            reason = Some("회고에 지친 표현이 자주 보여요".to_string());
        }
        patterns.push("부정적 표현 감지".to_string());
    }

    // Rule 4: default.
    let reason = reason.unwrap_or_else(|| "꾸준히 잘 기록하고 있어요".to_string());

    BurnoutAssessment {
        level,
        reason,
        patterns,
    }
}

/// Count reflections created within the last `days` days (day 0 = today).
///
/// Entries with unparseable timestamps are treated as outside every window.
fn count_within(reflections: &[Reflection], today: NaiveDate, days: u64) -> usize {
    let Some(cutoff) = today.checked_sub_days(Days::new(days - 1)) else {
        return 0;
    };
    reflections
        .iter()
        .filter_map(|r| created_date(r))
        .filter(|d| *d >= cutoff && *d <= today)
        .count()
}

fn created_date(reflection: &Reflection) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(&reflection.created_at)
        .ok()
        .map(|dt| dt.date_naive())
}
