//! 재시도 한 회분: provider 호출 → 응답 검증 → 렌더링 → 코멘트 게시.

use std::time::Instant;

use anyhow::Result;
use tracing::info;

use crate::application::ports::CompletionProvider;
use crate::application::usecases::review_pr::{ReviewPrUseCase, context::ExecutionContext};
use crate::domain::error::ReviewError;
use crate::domain::review::{RawCompletion, RunOptions};
use crate::domain::validation::validate_response;

pub(super) async fn run_attempt(
    use_case: &ReviewPrUseCase<'_>,
    ctx: &ExecutionContext,
    provider: &dyn CompletionProvider,
    prompt: &str,
    options: &RunOptions,
    attempt: u32,
) -> Result<()> {
    use_case.reporter.section(&format!(
        "Attempt {attempt}/{}",
        ctx.config.max_attempts()
    ));
    use_case
        .reporter
        .status(provider.name(), "requesting review");

    let started = Instant::now();
    let response = provider.generate(prompt).await?;
    let raw = RawCompletion {
        text: response.text,
        model_version: response.model_version,
        usage: response.usage,
        elapsed_secs: started.elapsed().as_secs_f64(),
    };
    use_case
        .reporter
        .status(provider.name(), &format!("done in {:.1}s", raw.elapsed_secs));
    use_case
        .reporter
        .kv("Usage", &use_case.renderer.format_usage(&raw.usage));

    let result = validate_response(&raw.text).map_err(ReviewError::from)?;
    use_case
        .reporter
        .kv("Suggestions", &result.suggestions.len().to_string());

    let comment = use_case.renderer.render(&result, &raw);

    if options.dry_run {
        use_case.reporter.section("Dry Run: Review Comment");
        use_case.reporter.raw(&comment.body);
        return Ok(());
    }

    use_case.reporter.status("VCS", "posting review comment");
    ctx.forge.publish_comment(&comment.body).await?;
    info!(
        target_pr = %ctx.target.display_name(),
        attempt,
        suggestions = result.suggestions.len(),
        "review comment posted"
    );
    use_case.reporter.status("VCS", "review comment posted");
    Ok(())
}
