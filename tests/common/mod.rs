//! 통합 테스트용 가짜 GitHub/Gemini 서버.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// 라우터를 임의 포트에 띄우고 base URL을 돌려준다.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[derive(Debug, Clone)]
pub struct RecordedComment {
    pub path: String,
    pub body: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
pub struct GitHubState {
    /// 페이지 번호(1부터) 순서의 files 응답
    pub pages: Vec<Value>,
    pub page_requests: Mutex<Vec<HashMap<String, String>>>,
    pub comments: Mutex<Vec<RecordedComment>>,
    /// 코멘트 생성 응답 상태 코드 시퀀스(비면 201)
    pub comment_statuses: Mutex<VecDeque<StatusCode>>,
}

pub fn file(name: &str, patch: Option<&str>) -> Value {
    match patch {
        Some(patch) => json!({ "filename": name, "status": "modified", "patch": patch }),
        None => json!({ "filename": name, "status": "added" }),
    }
}

pub async fn spawn_github(state: GitHubState) -> (String, Arc<GitHubState>) {
    let state = Arc::new(state);
    let router = Router::new()
        .route("/repos/{owner}/{repo}/pulls/{number}/files", get(list_files))
        .route(
            "/repos/{owner}/{repo}/issues/{number}/comments",
            post(create_comment),
        )
        .with_state(state.clone());
    (spawn(router).await, state)
}

async fn list_files(
    State(state): State<Arc<GitHubState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let page = query
        .get("page")
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(1);
    state.page_requests.lock().unwrap().push(query);
    Json(state.pages.get(page - 1).cloned().unwrap_or_else(|| json!([])))
}

async fn create_comment(
    State(state): State<Arc<GitHubState>>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let status = state
        .comment_statuses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or(StatusCode::CREATED);

    state.comments.lock().unwrap().push(RecordedComment {
        path: format!("/repos/{owner}/{repo}/issues/{number}/comments"),
        body: body["body"].as_str().unwrap_or_default().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    if status.is_success() {
        (status, Json(json!({ "id": 1, "body": body["body"] })))
    } else {
        (status, Json(json!({ "message": "boom" })))
    }
}

#[derive(Debug, Clone)]
pub struct RecordedGeneration {
    pub path: String,
    pub key: Option<String>,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct GeminiState {
    /// 순서대로 소비되는 응답. 마지막 하나는 계속 반복된다.
    pub responses: Mutex<VecDeque<(StatusCode, Value)>>,
    pub requests: Mutex<Vec<RecordedGeneration>>,
}

impl GeminiState {
    pub fn with_responses(responses: Vec<(StatusCode, Value)>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

/// 텍스트 하나를 담은 generateContent 성공 응답.
pub fn generation(text: &str) -> (StatusCode, Value) {
    (
        StatusCode::OK,
        json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": text }] } }
            ],
            "modelVersion": "gemini-test-001",
            "usageMetadata": {
                "promptTokenCount": 100,
                "candidatesTokenCount": 20,
                "totalTokenCount": 120
            }
        }),
    )
}

pub fn valid_review_json() -> String {
    json!({
        "summary": "One issue worth fixing.",
        "suggestions": [{
            "issue": "SQL built from user input",
            "severity": 1,
            "category": "security",
            "filePath": "src/db.rs",
            "lineNumber": 12,
            "codeSnippet": "format!(\"SELECT * FROM t WHERE id = {id}\")",
            "recommendation": "Use a bound parameter."
        }]
    })
    .to_string()
}

pub async fn spawn_gemini(state: GeminiState) -> (String, Arc<GeminiState>) {
    let state = Arc::new(state);
    let router = Router::new()
        .route("/v1beta/models/{*rest}", post(generate))
        .with_state(state.clone());
    (format!("{}/v1beta", spawn(router).await), state)
}

async fn generate(
    State(state): State<Arc<GeminiState>>,
    Path(rest): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(RecordedGeneration {
        path: rest,
        key: query.get("key").cloned(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let mut responses = state.responses.lock().unwrap();
    let (status, value) = if responses.len() > 1 {
        responses.pop_front().unwrap()
    } else {
        responses
            .front()
            .cloned()
            .unwrap_or_else(|| (StatusCode::INTERNAL_SERVER_ERROR, json!({})))
    };
    (status, Json(value))
}
