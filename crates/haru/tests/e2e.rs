// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: real router, real SQLite storage, scripted provider.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use haru_core::{ProviderAdapter, StorageAdapter};
use haru_gateway::{build_router, AppState, AuthConfig};
use haru_insight::InsightServices;
use haru_storage::SqliteStorage;
use haru_test_utils::MockProvider;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_app(provider: MockProvider) -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("e2e.db");
    let storage: Arc<dyn StorageAdapter> = Arc::new(SqliteStorage::new(
        haru_config::model::StorageConfig {
            database_path: db_path.to_str().unwrap().to_string(),
            wal_mode: true,
        },
    ));
    storage.initialize().await.unwrap();

    let provider: Arc<dyn ProviderAdapter> = Arc::new(provider);
    let services = Arc::new(InsightServices::new(provider, storage.clone(), 3));
    let state = AppState::new(
        services,
        storage,
        AuthConfig { bearer_token: None },
        Duration::from_secs(300),
    );
    (build_router(state), dir)
}

fn authed_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-haru-user", "user-1")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("x-haru-user", "user-1")
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn goal_breakdown_falls_back_after_three_malformed_responses() {
    // The documented failure scenario: three attempts of garbage, then the
    // fixed two-phase fallback -- still HTTP 200, still success: true.
    let provider = MockProvider::with_responses(vec![
        "물론이죠! 좋은 목표네요.",
        "phases: 먼저 준비운동을...",
        "{\"timeframe\": \"1개월\", \"phases\": []}",
    ]);
    let (app, _dir) = test_app(provider).await;

    let response = app
        .oneshot(authed_post(
            "/v1/ai/goal-breakdown",
            json!({"goalTitle": "건강해지기"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["timeframe"], "2-3개월");
    assert_eq!(body["data"]["phases"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn goal_breakdown_success_round_trips_model_output() {
    let model_response = r#"{
        "timeframe": "6주",
        "phases": [
            {
                "title": "준비",
                "description": "장비 갖추기",
                "duration": "1주",
                "tasks": [
                    {"title": "러닝화 찾기", "description": "신발장 정리", "timeEstimate": "10분", "difficulty": "easy"}
                ]
            }
        ]
    }"#;
    let (app, _dir) = test_app(MockProvider::with_responses(vec![model_response])).await;

    let response = app
        .oneshot(authed_post(
            "/v1/ai/goal-breakdown",
            json!({"goalTitle": "달리기 습관", "goalDescription": "주 3회 달리기"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["timeframe"], "6주");
    assert_eq!(body["data"]["phases"][0]["tasks"][0]["timeEstimate"], "10분");
}

#[tokio::test]
async fn missing_identity_header_is_401() {
    let (app, _dir) = test_app(MockProvider::failing()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/v1/ai/goal-breakdown")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"goalTitle": "x"}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn missing_goal_title_is_400_before_any_model_call() {
    let provider = MockProvider::failing();
    let (app, _dir) = test_app(provider).await;

    let response = app
        .oneshot(authed_post("/v1/ai/goal-breakdown", json!({"goalTitle": "  "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("goalTitle"));
}

#[tokio::test]
async fn bearer_token_guard_applies_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn StorageAdapter> = Arc::new(SqliteStorage::new(
        haru_config::model::StorageConfig {
            database_path: dir.path().join("auth.db").to_str().unwrap().to_string(),
            wal_mode: true,
        },
    ));
    storage.initialize().await.unwrap();
    let services = Arc::new(InsightServices::new(
        Arc::new(MockProvider::failing()) as Arc<dyn ProviderAdapter>,
        storage.clone(),
        3,
    ));
    let state = AppState::new(
        services,
        storage,
        AuthConfig {
            bearer_token: Some("sekrit".to_string()),
        },
        Duration::from_secs(300),
    );
    let app = build_router(state);

    // Identity header alone is not enough.
    let response = app
        .clone()
        .oneshot(authed_get("/v1/daily-tasks"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Bearer + identity passes.
    let request = Request::builder()
        .method("GET")
        .uri("/v1/daily-tasks")
        .header("authorization", "Bearer sekrit")
        .header("x-haru-user", "user-1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn reflection_create_normalizes_korean_intensity() {
    let (app, _dir) = test_app(MockProvider::failing()).await;

    let response = app
        .clone()
        .oneshot(authed_post(
            "/v1/reflections",
            json!({
                "title": "오늘의 회고",
                "content": "산책을 했다",
                "emotion": "calm",
                "intensity": "매우 좋음"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["intensity"], 5);

    // It comes back in the list.
    let response = app.oneshot(authed_get("/v1/reflections")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["emotion"], "calm");
}

#[tokio::test]
async fn unknown_emotion_label_is_400() {
    let (app, _dir) = test_app(MockProvider::failing()).await;

    let response = app
        .oneshot(authed_post(
            "/v1/reflections",
            json!({"title": "t", "content": "c", "emotion": "vibing"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn daily_task_completion_recomputes_goal_progress() {
    let (app, _dir) = test_app(MockProvider::failing()).await;

    // Create 2 tasks under one goal.
    let mut task_ids = Vec::new();
    for title in ["물 마시기", "스트레칭"] {
        let response = app
            .clone()
            .oneshot(authed_post(
                "/v1/daily-tasks",
                json!({"goalId": "g1", "title": title}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        task_ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    // Complete the first: 1/2 done -> 50%.
    let response = app
        .clone()
        .oneshot(authed_post(
            &format!("/v1/daily-tasks/{}/complete", task_ids[0]),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["task"]["isCompleted"], true);
    assert_eq!(body["data"]["task"]["streakCount"], 1);
    assert_eq!(body["data"]["progress"]["progressPercentage"], 50);
    assert_eq!(body["data"]["progress"]["dailyStreak"], 1);

    // Un-complete it again: back to 0%, streak untouched by uncompletion.
    let response = app
        .oneshot(authed_post(
            &format!("/v1/daily-tasks/{}/uncomplete", task_ids[0]),
            json!({}),
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"]["task"]["streakCount"], 0);
    assert_eq!(body["data"]["progress"]["progressPercentage"], 0);
}

#[tokio::test]
async fn questions_fall_back_to_the_generic_five() {
    let (app, _dir) = test_app(MockProvider::failing()).await;

    let response = app
        .oneshot(authed_post("/v1/ai/reflection-questions", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["questions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn schedule_recommendations_fail_to_empty_list() {
    let (app, _dir) = test_app(MockProvider::failing()).await;

    let response = app
        .oneshot(authed_post(
            "/v1/ai/schedule-recommendations",
            json!({"userRequest": "운동 시간을 잡아줘"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn just_do_it_reports_burnout_for_a_new_user() {
    let (app, _dir) = test_app(MockProvider::failing()).await;

    let response = app.oneshot(authed_get("/v1/ai/just-do-it")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    // New user: no reflections at all -> high burnout, fallback actions.
    assert_eq!(body["data"]["burnoutLevel"], "high");
    assert_eq!(body["data"]["microActions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn goal_created_from_breakdown_round_trips_phases() {
    let (app, _dir) = test_app(MockProvider::failing()).await;

    let phases = json!([
        {
            "title": "기초",
            "description": "시작 단계",
            "duration": "2주",
            "completed": false,
            "tasks": [
                {"title": "걷기", "description": "10분", "timeEstimate": "10분", "difficulty": "easy", "completed": false}
            ]
        }
    ]);
    let response = app
        .clone()
        .oneshot(authed_post(
            "/v1/goals",
            json!({"title": "건강해지기", "timeframe": "2-3개월", "phases": phases}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let goal_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["progress"], 0);

    let response = app
        .oneshot(authed_get(&format!("/v1/goals/{goal_id}")))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"]["phases"], phases);
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let (app, _dir) = test_app(MockProvider::failing()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn analytics_summary_is_cached_per_user() {
    let (app, _dir) = test_app(MockProvider::failing()).await;

    // Empty summary for a fresh user.
    let response = app
        .clone()
        .oneshot(authed_get("/v1/analytics/summary"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["reflectionCount"], 0);

    // Write a reflection, then read the summary again: the cached value is
    // served until the TTL lapses, so the count stays 0.
    let response = app
        .clone()
        .oneshot(authed_post(
            "/v1/reflections",
            json!({"title": "t", "content": "c"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed_get("/v1/analytics/summary"))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"]["reflectionCount"], 0);

    // A different user misses the cache and sees their own (empty) data.
    let request = Request::builder()
        .method("GET")
        .uri("/v1/analytics/summary")
        .header("x-haru-user", "user-2")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"]["reflectionCount"], 0);
}
