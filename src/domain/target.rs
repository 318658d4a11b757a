//! 리뷰 대상 Pull Request 식별자.
//! GitHub Actions 환경(`owner/repo` + 번호) 또는 URL 입력에서 생성한다.

use anyhow::{Result, anyhow, bail};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestTarget {
    pub api_base: String,
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl PullRequestTarget {
    /// `GITHUB_REPOSITORY` 형식(`owner/repo`)과 PR 번호로 대상을 만든다.
    pub fn from_repository(api_base: &str, repository: &str, number: u64) -> Result<Self> {
        let Some((owner, repo)) = repository.trim().split_once('/') else {
            bail!("invalid repository '{repository}', expected owner/repo");
        };
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            bail!("invalid repository '{repository}', expected owner/repo");
        }

        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
        })
    }

    /// PR 웹 URL 또는 REST API URL을 해석한다.
    ///
    /// - `https://github.com/{owner}/{repo}/pull/{n}`
    /// - `https://api.github.com/repos/{owner}/{repo}/pulls/{n}[/files]`
    ///
    /// 웹 URL이면 `default_api_base`를, API URL이면 URL 자신의 origin을 쓴다.
    pub fn parse_url(input: &str, default_api_base: &str) -> Result<Self> {
        let url = Url::parse(input.trim())?;
        let host = url.host_str().ok_or_else(|| anyhow!("URL host is missing"))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();

        // /repos/owner/repo/pulls/<n>[/files]
        if let Some(idx) = segments.iter().position(|s| *s == "repos")
            && segments.len() >= idx + 5
            && segments[idx + 3] == "pulls"
        {
            let number = parse_number(segments[idx + 4])?;
            let prefix = segments[..idx].join("/");
            let mut api_base = format!("{}://{}", url.scheme(), host);
            if let Some(port) = url.port() {
                api_base.push_str(&format!(":{port}"));
            }
            if !prefix.is_empty() {
                api_base.push('/');
                api_base.push_str(&prefix);
            }
            return Ok(Self {
                api_base,
                owner: segments[idx + 1].to_string(),
                repo: segments[idx + 2].to_string(),
                number,
            });
        }

        // /owner/repo/pull/<n>
        if segments.len() >= 4 && segments[2] == "pull" {
            return Ok(Self {
                api_base: default_api_base.trim_end_matches('/').to_string(),
                owner: segments[0].to_string(),
                repo: segments[1].to_string(),
                number: parse_number(segments[3])?,
            });
        }

        bail!("unsupported pull request URL: {input}")
    }

    pub fn repo_endpoint(&self) -> String {
        format!("{}/repos/{}/{}", self.api_base, self.owner, self.repo)
    }

    pub fn files_endpoint(&self) -> String {
        format!("{}/pulls/{}/files", self.repo_endpoint(), self.number)
    }

    pub fn comments_endpoint(&self) -> String {
        format!("{}/issues/{}/comments", self.repo_endpoint(), self.number)
    }

    pub fn display_name(&self) -> String {
        format!("{}/{}#{}", self.owner, self.repo, self.number)
    }
}

fn parse_number(raw: &str) -> Result<u64> {
    raw.parse()
        .map_err(|_| anyhow!("invalid pull request number: {raw}"))
}
