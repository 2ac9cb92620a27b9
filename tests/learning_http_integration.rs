//! Integration tests for the learning HTTP API.
//!
//! Drives the full router (auth middleware, routes, handlers, in-memory
//! storage) with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use student_model::adapters::auth::MockSessionValidator;
use student_model::adapters::http::{build_router, AuthState, HttpSettings, LearningHandlers};
use student_model::adapters::learning::{
    InMemoryKnowledgeStateRepository, InMemoryLearningProfileRepository,
};
use student_model::domain::foundation::{DomainError, UserId};
use student_model::ports::LearningProfileRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

const TOKEN: &str = "learner-token";
const LEARNER: &str = "learner-1";

struct TestApp {
    router: Router,
    profiles: InMemoryLearningProfileRepository,
}

fn test_app_with(profiles: InMemoryLearningProfileRepository) -> TestApp {
    let validator: AuthState = Arc::new(MockSessionValidator::new().with_test_user(TOKEN, LEARNER));
    let handlers = LearningHandlers::from_repositories(
        Arc::new(profiles.clone()),
        Arc::new(InMemoryKnowledgeStateRepository::new()),
    );
    TestApp {
        router: build_router(handlers, validator, &HttpSettings::default()),
        profiles,
    }
}

fn test_app() -> TestApp {
    test_app_with(InMemoryLearningProfileRepository::new())
}

fn authed(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", TOKEN));
    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn learner() -> UserId {
    UserId::new(LEARNER).unwrap()
}

// =============================================================================
// Health and Auth
// =============================================================================

#[tokio::test]
async fn health_needs_no_token() {
    let app = test_app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn learning_routes_require_auth() {
    let app = test_app();
    let request = Request::builder()
        .uri("/api/learning/profile")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

// =============================================================================
// Interactions
// =============================================================================

#[tokio::test]
async fn quiz_interaction_returns_evaluation_and_metrics() {
    let app = test_app();
    let request = authed(
        "POST",
        "/api/learning/interactions",
        Some(json!({
            "question": "Why does this work?",
            "response": "Because the force balances, however gravity pulls down.",
            "interaction_type": "quiz"
        })),
    );

    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["evaluation"]["depth"].as_f64().unwrap() >= 0.8);
    assert!(body["evaluation"]["comprehension"].as_f64().unwrap() >= 0.5);
    assert_eq!(body["profile_metrics"]["current_level"], "advanced");
    assert_eq!(body["profile_metrics"]["learning_style"], "kinesthetic");

    let stored = app.profiles.find_by_user(&learner()).await.unwrap().unwrap();
    assert_eq!(stored.cognitive_metrics.quiz_scores, vec![50.0]);
}

#[tokio::test]
async fn unknown_interaction_type_is_rejected() {
    let app = test_app();
    let request = authed(
        "POST",
        "/api/learning/interactions",
        Some(json!({ "question": "q", "response": "r", "interaction_type": "essay" })),
    );

    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["message"].as_str().unwrap().contains("essay"));
    assert!(app.profiles.is_empty().await);
}

#[tokio::test]
async fn malformed_attempts_body_is_a_json_400() {
    let app = test_app();
    let request = authed(
        "POST",
        "/api/learning/attempts",
        Some(json!({ "quiz_attempts": [{ "quiz_id": "q1", "score": "high" }] })),
    );

    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn storage_outage_maps_to_503() {
    let app = test_app_with(InMemoryLearningProfileRepository::failing(
        DomainError::configuration("profile store unavailable"),
    ));
    let request = authed(
        "POST",
        "/api/learning/interactions",
        Some(json!({ "question": "What is it?", "response": "A thing" })),
    );

    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "CONFIGURATION_ERROR");
}

// =============================================================================
// Styles, Attempts, Profile
// =============================================================================

#[tokio::test]
async fn style_extraction_stores_nothing() {
    let app = test_app();
    let request = authed(
        "POST",
        "/api/learning/styles",
        Some(json!({ "chat_history": ["I prefer to see a diagram", "show me a chart"] })),
    );

    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["perceptual_mode"]["visual"].as_f64().unwrap() > 0.0);
    assert!(app.profiles.is_empty().await);
}

#[tokio::test]
async fn attempts_update_metrics_and_report_skips() {
    let app = test_app();
    let request = authed(
        "POST",
        "/api/learning/attempts",
        Some(json!({
            "quiz_attempts": [
                { "quiz_id": "q1", "score": 80, "time_taken": 10, "level": "beginner" },
                { "quiz_id": "q2", "score": 60, "time_taken": 20, "level": "beginner" },
                { "quiz_id": "q3", "score": 90, "time_taken": 5, "level": "expert" }
            ]
        })),
    );

    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    let beginner = body["profile"]["cognitive_metrics"]["beginner_level"]
        .as_f64()
        .unwrap();
    assert!((beginner - 0.7).abs() < 1e-9);
    assert_eq!(body["skipped"][0]["id"], "q3");
}

#[tokio::test]
async fn profile_defaults_until_stored_then_deletes() {
    let app = test_app();

    let (status, body) = send(&app.router, authed("GET", "/api/learning/profile", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stored"], false);
    assert_eq!(body["metrics"]["current_level"], "beginner");

    let interaction = authed(
        "POST",
        "/api/learning/interactions",
        Some(json!({ "question": "How do I draw this?", "response": "Like so" })),
    );
    send(&app.router, interaction).await;

    let (_, body) = send(&app.router, authed("GET", "/api/learning/profile", None)).await;
    assert_eq!(body["stored"], true);
    assert_eq!(body["profile"]["schema_version"], 2);

    let (status, _) = send(&app.router, authed("DELETE", "/api/learning/profile", None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(app.profiles.is_empty().await);
}

// =============================================================================
// Knowledge
// =============================================================================

#[tokio::test]
async fn knowledge_state_round_trip() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        authed(
            "POST",
            "/api/learning/knowledge",
            Some(json!({ "chat_history": ["fractions confuse me"] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topics"], json!({}));

    let (status, body) = send(&app.router, authed("GET", "/api/learning/knowledge", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["misconceptions"], json!([]));
}
