mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{
    GeminiState, GitHubState, file, generation, spawn, spawn_gemini, spawn_github,
    valid_review_json,
};
use prreview::application::config::Config;
use prreview::interface::composition::AppComposition;
use prreview::interface::server::{AppState, router};

async fn spawn_service(github_base: &str, gemini_base: &str) -> String {
    let config: Config = serde_json::from_value(json!({
        "provider": { "api_base": gemini_base, "api_key": "test-key", "model": "gemini-test" },
        "forge": { "api_base": github_base, "token": "gh-token" }
    }))
    .unwrap();
    let state = Arc::new(AppState {
        composition: AppComposition::default(),
        config,
    });
    spawn(router(state)).await
}

async fn post_review(service: &str, body: Value) -> (StatusCode, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{service}/review"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn review_returns_validated_result_and_usage() {
    let (github, github_state) = spawn_github(GitHubState {
        pages: vec![json!([file("src/db.rs", Some("@@ -10 +10 @@\n+query(id)"))])],
        ..Default::default()
    })
    .await;
    let (gemini, gemini_state) =
        spawn_gemini(GeminiState::with_responses(vec![generation(&valid_review_json())])).await;
    let service = spawn_service(&github, &gemini).await;

    let (status, body) = post_review(
        &service,
        json!({ "url": "https://github.com/acme/widgets/pull/7" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["review"]["summary"], "One issue worth fixing.");
    assert_eq!(body["review"]["suggestions"][0]["category"], "security");
    assert_eq!(body["review"]["suggestions"][0]["filePath"], "src/db.rs");
    assert_eq!(body["model"]["version"], "gemini-test-001");
    assert_eq!(body["model"]["usage"]["totalTokens"], 120);
    assert!(body["model"]["elapsedSeconds"].as_f64().is_some());

    // 서비스 모드는 코멘트를 게시하지 않는다.
    assert!(github_state.comments.lock().unwrap().is_empty());
    let prompt = gemini_state.requests.lock().unwrap()[0].body["contents"][0]["parts"][0]
        ["text"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.contains("diff --git a/src/db.rs b/src/db.rs"));
}

#[tokio::test]
async fn empty_diff_returns_nulls_without_calling_provider() {
    let (github, _github_state) = spawn_github(GitHubState {
        pages: vec![json!([])],
        ..Default::default()
    })
    .await;
    let (gemini, gemini_state) = spawn_gemini(GeminiState::default()).await;
    let service = spawn_service(&github, &gemini).await;

    let (status, body) = post_review(
        &service,
        json!({ "url": "https://github.com/acme/widgets/pull/7" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "review": null, "model": null }));
    assert!(gemini_state.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_model_output_is_a_bad_request() {
    let (github, _github_state) = spawn_github(GitHubState {
        pages: vec![json!([file("a.rs", Some("+x"))])],
        ..Default::default()
    })
    .await;
    let (gemini, _gemini_state) =
        spawn_gemini(GeminiState::with_responses(vec![generation("not json at all")])).await;
    let service = spawn_service(&github, &gemini).await;

    let (status, body) = post_review(
        &service,
        json!({ "url": "https://github.com/acme/widgets/pull/7" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not JSON"));
}

#[tokio::test]
async fn invalid_url_and_body_are_bad_requests() {
    let service = spawn_service("http://127.0.0.1:9", "http://127.0.0.1:9").await;

    let (status, body) = post_review(&service, json!({ "url": "https://example.com/x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("unsupported pull request URL"));

    let (status, body) = post_review(&service, json!({ "link": "nope" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let service = spawn_service("http://127.0.0.1:9", "http://127.0.0.1:9").await;

    let resp = reqwest::get(format!("{service}/health")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "not found" }));
}
