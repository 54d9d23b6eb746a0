// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static fallback payloads, one per task kind.
//!
//! Returned when the retry budget is exhausted. Same schema as a successful
//! response; callers cannot tell the difference from the shape, only from
//! the outcome's internal flag. Schedule recommendations deliberately have
//! NO fallback entries: fabricated calendar commitments would be worse than
//! an empty list.

use haru_core::types::{Difficulty, GoalTask, MicroAction, Phase};

use crate::payload::{GoalBreakdown, ReflectionAnalysis};

/// Generic two-phase goal plan.
pub fn goal_breakdown() -> GoalBreakdown {
    GoalBreakdown {
        timeframe: "2-3개월".to_string(),
        phases: vec![
            Phase {
                title: "시작하기".to_string(),
                description: "부담 없이 첫걸음을 떼는 단계예요".to_string(),
                duration: "2-4주".to_string(),
                completed: false,
                tasks: vec![
                    GoalTask {
                        title: "목표를 한 문장으로 적어보기".to_string(),
                        description: "왜 이 목표를 세웠는지 한 문장으로 정리해요".to_string(),
                        time_estimate: "5분".to_string(),
                        difficulty: Difficulty::Easy,
                        completed: false,
                    },
                    GoalTask {
                        title: "매일 10분 실천하기".to_string(),
                        description: "짧아도 좋으니 매일 한 번 목표와 관련된 일을 해요"
                            .to_string(),
                        time_estimate: "10분".to_string(),
                        difficulty: Difficulty::Easy,
                        completed: false,
                    },
                ],
            },
            Phase {
                title: "습관으로 만들기".to_string(),
                description: "꾸준함을 쌓아가는 단계예요".to_string(),
                duration: "4-8주".to_string(),
                completed: false,
                tasks: vec![
                    GoalTask {
                        title: "일주일 돌아보기".to_string(),
                        description: "잘된 점과 어려웠던 점을 각각 하나씩 적어요".to_string(),
                        time_estimate: "10분".to_string(),
                        difficulty: Difficulty::Easy,
                        completed: false,
                    },
                    GoalTask {
                        title: "실천 시간 늘려보기".to_string(),
                        description: "익숙해졌다면 10분을 20분으로 늘려봐요".to_string(),
                        time_estimate: "20분".to_string(),
                        difficulty: Difficulty::Medium,
                        completed: false,
                    },
                ],
            },
        ],
    }
}

/// Warm always-succeeds analysis. Gates onboarding UX, so it must read like
/// a real response, not an apology.
pub fn reflection_analysis() -> ReflectionAnalysis {
    ReflectionAnalysis {
        emotion: "calm".to_string(),
        intensity: 3,
        key_insights: vec![
            "오늘 하루를 돌아본 것 자체가 의미 있는 한 걸음이에요".to_string(),
        ],
        response: "솔직하게 기록해 주셔서 고마워요. 이렇게 하루를 돌아보는 시간이 \
                   쌓이면 분명 변화가 느껴질 거예요."
            .to_string(),
        action_suggestions: vec![
            "내일 아침, 물 한 잔 마시면서 오늘 하루 계획 떠올려보기".to_string(),
            "잠들기 전에 좋았던 순간 하나만 떠올려보기".to_string(),
        ],
        emotion_trend: "안정적".to_string(),
    }
}

/// Five generic micro-actions tagged by category.
pub fn micro_actions() -> Vec<MicroAction> {
    fn action(title: &str, description: &str, time: &str, category: &str) -> MicroAction {
        MicroAction {
            title: title.to_string(),
            description: description.to_string(),
            time_estimate: time.to_string(),
            difficulty: Difficulty::Easy,
            category: category.to_string(),
        }
    }

    vec![
        action(
            "창문 열고 숨 쉬기",
            "창문을 열고 깊게 세 번 숨을 쉬어요",
            "30초",
            "환기",
        ),
        action(
            "물 한 잔 마시기",
            "천천히 물 한 잔을 마시며 잠깐 쉬어요",
            "1분",
            "몸 풀기",
        ),
        action(
            "책상 위 한 가지 치우기",
            "눈앞에 보이는 물건 딱 하나만 제자리에 둬요",
            "1분",
            "정리",
        ),
        action(
            "어깨 돌리기",
            "어깨를 뒤로 다섯 번, 앞으로 다섯 번 돌려요",
            "1분",
            "몸 풀기",
        ),
        action(
            "고마운 사람 떠올리기",
            "고마운 사람 한 명을 떠올리고 이유를 생각해요",
            "2분",
            "마음 돌보기",
        ),
    ]
}

/// Five generic reflection questions.
pub fn questions() -> Vec<String> {
    vec![
        "오늘 가장 기억에 남는 순간은 언제였나요?".to_string(),
        "오늘 나를 웃게 한 것이 있다면 무엇인가요?".to_string(),
        "오늘 조금 힘들었던 일은 무엇이고, 어떻게 지나갔나요?".to_string(),
        "내일의 나에게 한 가지를 부탁한다면 무엇인가요?".to_string(),
        "오늘의 나에게 해주고 싶은 말이 있나요?".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Validate;

    #[test]
    fn fallback_breakdown_satisfies_its_own_contract() {
        let breakdown = goal_breakdown();
        assert!(breakdown.validate().is_ok());
        assert_eq!(breakdown.timeframe, "2-3개월");
        assert_eq!(breakdown.phases.len(), 2);
    }

    #[test]
    fn fallback_analysis_satisfies_its_own_contract() {
        assert!(reflection_analysis().validate().is_ok());
    }

    #[test]
    fn fallback_micro_actions_are_five_and_easy() {
        let actions = micro_actions();
        assert_eq!(actions.len(), 5);
        assert!(actions
            .iter()
            .all(|a| a.difficulty == Difficulty::Easy && !a.category.is_empty()));
    }

    #[test]
    fn fallback_questions_are_five() {
        assert_eq!(questions().len(), 5);
    }
}
