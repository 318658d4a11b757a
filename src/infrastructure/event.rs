//! GitHub Actions 실행 환경(이벤트 payload/환경변수)에서 리뷰 대상 PR을 읽는다.

use std::env;
use std::fs;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::domain::target::PullRequestTarget;

pub const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";
pub const EVENT_PATH_ENV: &str = "GITHUB_EVENT_PATH";

/// 프로세스 환경변수로 대상 PR을 찾는다.
pub fn load_target(api_base: &str) -> Result<PullRequestTarget> {
    load_target_with(api_base, |name| env::var(name).ok())
}

pub(crate) fn load_target_with(
    api_base: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<PullRequestTarget> {
    let repository = lookup(REPOSITORY_ENV)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("{REPOSITORY_ENV} is not set"))?;
    let event_path = lookup(EVENT_PATH_ENV)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("{EVENT_PATH_ENV} is not set"))?;

    let raw = fs::read_to_string(&event_path)
        .with_context(|| format!("failed to read event payload at {event_path}"))?;
    let number = parse_event_number(&raw)?;

    PullRequestTarget::from_repository(api_base, repository.trim(), number)
}

/// `pull_request.number`를 우선 사용하고, 없으면 최상위 `number`로 폴백한다.
pub fn parse_event_number(raw: &str) -> Result<u64> {
    let payload: Value = serde_json::from_str(raw).context("invalid event payload JSON")?;

    let number = payload
        .pointer("/pull_request/number")
        .and_then(Value::as_u64)
        .or_else(|| payload.get("number").and_then(Value::as_u64));

    match number {
        Some(n) if n > 0 => Ok(n),
        _ => bail!("event payload does not reference a pull request number"),
    }
}
