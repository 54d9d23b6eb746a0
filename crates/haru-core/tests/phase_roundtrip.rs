// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for the JSON-text encoding of goal phase plans.
//!
//! Goals persist their phases as JSON in a single column; any phase plan
//! the system can represent must survive encode/decode exactly, including
//! Unicode text and empty task lists.

use haru_core::types::{Difficulty, GoalTask, Phase};
use proptest::prelude::*;

fn arb_difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn arb_task() -> impl Strategy<Value = GoalTask> {
    (
        ".*",
        ".*",
        ".*",
        arb_difficulty(),
        any::<bool>(),
    )
        .prop_map(|(title, description, time_estimate, difficulty, completed)| GoalTask {
            title,
            description,
            time_estimate,
            difficulty,
            completed,
        })
}

fn arb_phase() -> impl Strategy<Value = Phase> {
    (
        ".*",
        ".*",
        ".*",
        any::<bool>(),
        prop::collection::vec(arb_task(), 0..5),
    )
        .prop_map(|(title, description, duration, completed, tasks)| Phase {
            title,
            description,
            duration,
            completed,
            tasks,
        })
}

proptest! {
    #[test]
    fn phases_round_trip_through_json_text(phases in prop::collection::vec(arb_phase(), 0..5)) {
        let encoded = serde_json::to_string(&phases).unwrap();
        let decoded: Vec<Phase> = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, phases);
    }
}

#[test]
fn unicode_heavy_plan_round_trips() {
    let phases = vec![Phase {
        title: "기초 다지기 🌱".to_string(),
        description: "한글과 emoji, \"quotes\", 줄\n바꿈".to_string(),
        duration: "2주".to_string(),
        completed: false,
        tasks: vec![GoalTask {
            title: "10분 걷기".to_string(),
            description: "저녁 식사 후 산책, 아주 가볍게".to_string(),
            time_estimate: "10분".to_string(),
            difficulty: Difficulty::Easy,
            completed: true,
        }],
    }];
    let encoded = serde_json::to_string(&phases).unwrap();
    let decoded: Vec<Phase> = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, phases);
}

#[test]
fn empty_task_lists_round_trip() {
    let phases = vec![Phase {
        title: "빈 단계".to_string(),
        description: String::new(),
        duration: "1주".to_string(),
        completed: false,
        tasks: vec![],
    }];
    let encoded = serde_json::to_string(&phases).unwrap();
    let decoded: Vec<Phase> = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, phases);
}
