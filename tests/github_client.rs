mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{GitHubState, file, spawn_github};
use prreview::application::ports::ForgeGateway;
use prreview::domain::error::ReviewError;
use prreview::domain::target::PullRequestTarget;
use prreview::infrastructure::vcs::github::GitHubClient;

fn target(api_base: &str) -> PullRequestTarget {
    PullRequestTarget::from_repository(api_base, "acme/widgets", 7).unwrap()
}

#[tokio::test]
async fn fetch_diff_walks_every_page() {
    let first_page: Vec<Value> = (0..100)
        .map(|i| file(&format!("src/f{i}.rs"), Some("@@ -1 +1 @@\n-a\n+b")))
        .collect();
    let state = GitHubState {
        pages: vec![
            Value::Array(first_page),
            json!([file("logo.png", None), file("README.md", Some("+docs"))]),
        ],
        ..Default::default()
    };
    let (base, state) = spawn_github(state).await;

    let client = GitHubClient::new(target(&base), Some("t0ken".to_string()));
    let diff = client.fetch_diff().await.unwrap();

    let requests = state.page_requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].get("per_page").map(String::as_str), Some("100"));
    assert_eq!(requests[1].get("page").map(String::as_str), Some("2"));

    assert!(diff.starts_with("diff --git a/src/f0.rs b/src/f0.rs\n@@ -1 +1 @@"));
    assert!(diff.ends_with("diff --git a/README.md b/README.md\n+docs"));
    assert!(!diff.contains("logo.png"));
    assert_eq!(diff.matches("diff --git").count(), 101);
}

#[tokio::test]
async fn fetch_diff_is_empty_without_patches() {
    let state = GitHubState {
        pages: vec![json!([file("logo.png", None)])],
        ..Default::default()
    };
    let (base, _state) = spawn_github(state).await;

    let diff = GitHubClient::new(target(&base), None)
        .fetch_diff()
        .await
        .unwrap();
    assert!(diff.is_empty());
}

#[tokio::test]
async fn publish_posts_body_with_token() {
    let (base, state) = spawn_github(GitHubState::default()).await;

    GitHubClient::new(target(&base), Some("t0ken".to_string()))
        .publish_comment("# AI PR REVIEW BOT")
        .await
        .unwrap();

    let comments = state.comments.lock().unwrap().clone();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].path, "/repos/acme/widgets/issues/7/comments");
    assert_eq!(comments[0].body, "# AI PR REVIEW BOT");
    assert_eq!(comments[0].authorization.as_deref(), Some("Bearer t0ken"));
}

#[tokio::test]
async fn publish_failure_carries_status_and_body() {
    let state = GitHubState::default();
    state
        .comment_statuses
        .lock()
        .unwrap()
        .push_back(StatusCode::INTERNAL_SERVER_ERROR);
    let (base, _state) = spawn_github(state).await;

    let err = GitHubClient::new(target(&base), Some("t0ken".to_string()))
        .publish_comment("body")
        .await
        .unwrap_err();

    match err.downcast_ref::<ReviewError>() {
        Some(ReviewError::PublishFailure {
            status,
            status_text,
            body,
        }) => {
            assert_eq!(*status, 500);
            assert_eq!(status_text, "Internal Server Error");
            assert!(body.contains("boom"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
