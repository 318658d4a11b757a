//! 서비스 모드 HTTP 서버(axum).
//! `POST /review`로 PR URL을 받아 분석 결과를 동기로 돌려준다. 코멘트는 게시하지 않는다.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, instrument, warn};

use crate::application::config::Config;
use crate::application::ports::ConfigRepository;
use crate::application::usecases::analyze_pr::Analysis;
use crate::interface::composition::AppComposition;

/// 요청 간에 공유되는 불변 상태.
pub struct AppState {
    pub composition: AppComposition,
    pub config: Config,
}

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub url: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    #[error("{0:#}")]
    Pipeline(anyhow::Error),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Pipeline(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Pipeline(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/review", post(review_route))
        .fallback(not_found)
        .with_state(state)
}

#[instrument(name = "review_route", skip_all)]
async fn review_route(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ReviewBody>, JsonRejection>,
) -> AppResult<Json<Analysis>> {
    let Json(body) = body?;
    info!(url = %body.url, "review requested");

    let analysis = state
        .composition
        .analyze_usecase(&state.config)
        .execute(&body.url)
        .await
        .inspect_err(|err| warn!(url = %body.url, error = %format!("{err:#}"), "review failed"))?;

    Ok(Json(analysis))
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// 설정을 한 번 로딩하고 Ctrl+C까지 요청을 처리한다.
pub async fn serve(composition: AppComposition, port_override: Option<u16>) -> Result<()> {
    let config = composition.config_repo.load()?;
    let port = port_override.unwrap_or_else(|| config.server_port());
    let state = Arc::new(AppState {
        composition,
        config,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "review service listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("review service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
