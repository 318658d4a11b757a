//! 리뷰 실행 컨텍스트(설정/대상/forge 연결) 준비와 diff 수집 단계.

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::application::config::Config;
use crate::application::ports::{CompletionProvider, ForgeGateway};
use crate::application::usecases::review_pr::ReviewPrUseCase;
use crate::domain::error::ReviewError;
use crate::domain::policy::truncate;
use crate::domain::review::{ReviewRequest, RunOptions};
use crate::domain::target::PullRequestTarget;

/// 리뷰 유스케이스 전 구간에서 공유되는 실행 상태.
pub(super) struct ExecutionContext {
    pub config: Config,
    pub target: PullRequestTarget,
    pub forge: Box<dyn ForgeGateway>,
}

/// 설정 로딩, 이벤트 payload 해석, forge 토큰 확인까지 선행한다.
pub(super) fn load_execution_context(
    use_case: &ReviewPrUseCase<'_>,
    options: &RunOptions,
) -> Result<ExecutionContext> {
    use_case.reporter.section("Load Config");
    let config = use_case
        .config_repo
        .load()
        .context("failed to load prreview config")?;

    let target = use_case
        .trigger
        .load_target(config.forge_api_base())
        .context("failed to resolve pull request from event payload")?;

    let token = use_case.credentials.forge_token(&config.forge);
    if !options.dry_run && token.is_none() {
        bail!(
            "missing forge token. Set the {} environment variable or forge.token in config, or use --dry-run",
            config.forge.token_env()
        );
    }

    use_case.reporter.kv("Target", &target.display_name());
    use_case.reporter.kv("Model", config.model());
    use_case
        .reporter
        .kv("Attempts", &config.max_attempts().to_string());

    let forge = use_case.forge_factory.build(&target, token);
    Ok(ExecutionContext {
        config,
        target,
        forge,
    })
}

/// diff를 받아 리뷰 요청을 만든다.
/// diff가 비었거나 가져올 수 없으면 None(리뷰 없이 정상 종료)을 반환한다.
pub(super) async fn fetch_review_request(
    use_case: &ReviewPrUseCase<'_>,
    ctx: &ExecutionContext,
) -> Option<ReviewRequest> {
    use_case.reporter.section("Fetch Diff");
    use_case.reporter.status("VCS", "fetching changed files");

    let diff = match ctx.forge.fetch_diff().await {
        Ok(diff) => diff,
        Err(err) => {
            let err = ReviewError::DiffUnavailable(format!("{err:#}"));
            warn!(target_pr = %ctx.target.display_name(), error = %err, "skipping review");
            use_case.reporter.status("VCS", &err.to_string());
            return None;
        }
    };

    if diff.trim().is_empty() {
        info!(target_pr = %ctx.target.display_name(), "no diff found");
        use_case.reporter.status("VCS", "no diff found; nothing to review");
        return None;
    }

    let total_chars = diff.chars().count();
    use_case.reporter.kv("Diff Chars", &total_chars.to_string());

    let max = ctx.config.max_diff_chars();
    let bounded = truncate(&diff, max);
    if bounded.len() < diff.len() {
        warn!(total_chars, max_chars = max, "diff truncated before prompt embedding");
        use_case.reporter.kv("Truncated", &format!("to {max} chars"));
    }

    Some(ReviewRequest {
        target: ctx.target.clone(),
        diff: bounded.to_string(),
    })
}

/// provider API key를 해석해 completion provider를 구성한다.
pub(super) fn build_provider(
    use_case: &ReviewPrUseCase<'_>,
    ctx: &ExecutionContext,
) -> Result<Box<dyn CompletionProvider>> {
    let api_key = use_case
        .credentials
        .provider_api_key(&ctx.config.provider)
        .with_context(|| {
            format!(
                "missing provider API key. Set the {} environment variable or provider.api_key in config",
                ctx.config.provider.api_key_env()
            )
        })?;

    Ok(use_case.provider_factory.build(&ctx.config, api_key))
}
