//! GitHub API 연동 구현.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::application::ports::ForgeGateway;
use crate::domain::error::ReviewError;
use crate::domain::target::PullRequestTarget;

use super::{ChangedFile, concat_patches};

const PER_PAGE: usize = 100;
/// files API가 돌려줄 수 있는 최대 페이지 수(3000 파일).
const MAX_PAGES: usize = 30;

pub struct GitHubClient {
    client: Client,
    target: PullRequestTarget,
    token: Option<String>,
}

impl GitHubClient {
    /// GitHub 대상 클라이언트를 생성한다.
    pub fn new(target: PullRequestTarget, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            target,
            token,
        }
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        // 공통 헤더/인증 적용.
        let req = self
            .client
            .request(method, url)
            .header("User-Agent", "prreview")
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            req.bearer_auth(token)
        } else {
            req
        }
    }

    async fn fetch_files_page(&self, page: usize) -> Result<Vec<FileResponse>> {
        let resp = self
            .request(Method::GET, self.target.files_endpoint())
            .query(&[("per_page", PER_PAGE), ("page", page)])
            .send()
            .await
            .context("github: failed to list PR files")?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .context("github: failed to read PR files body")?;

        if !status.is_success() {
            anyhow::bail!("github: failed to list PR files ({status}): {body}");
        }

        serde_json::from_str(&body).context("github: invalid PR files JSON")
    }
}

#[derive(Debug, Deserialize)]
struct FileResponse {
    filename: String,
    #[serde(default)]
    patch: Option<String>,
}

#[async_trait]
impl ForgeGateway for GitHubClient {
    async fn fetch_diff(&self) -> Result<String> {
        // 페이지가 가득 차지 않을 때까지 변경 파일 목록을 순회한다.
        let mut files = Vec::new();
        for page in 1..=MAX_PAGES {
            let batch = self.fetch_files_page(page).await?;
            let count = batch.len();
            debug!(page, count, "fetched PR files page");

            files.extend(batch.into_iter().map(|f| ChangedFile {
                filename: f.filename,
                patch: f.patch,
            }));

            if count < PER_PAGE {
                break;
            }
        }

        Ok(concat_patches(&files))
    }

    async fn publish_comment(&self, body: &str) -> Result<()> {
        let resp = self
            .request(Method::POST, self.target.comments_endpoint())
            .json(&json!({ "body": body }))
            .send()
            .await
            .context("github: failed to create comment")?;

        let status = resp.status();
        let response_body = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(ReviewError::PublishFailure {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: response_body,
            }
            .into());
        }

        Ok(())
    }
}
