//! PR 리뷰 실행의 전체 오케스트레이션 유스케이스.
//!
//! diff 수집 → 프롬프트 구성 → (재시도: provider 호출 → 검증 → 렌더링 → 게시)

mod attempt;
mod context;
mod retry;

use anyhow::Result;

use crate::application::ports::{
    CommentRenderer, ConfigRepository, CredentialResolver, ForgeFactory, ProviderFactory,
    Reporter, TriggerSource,
};
use crate::domain::policy::build_prompt;
use crate::domain::review::{ReviewOutcome, RunOptions};

use attempt::run_attempt;
use context::{build_provider, fetch_review_request, load_execution_context};

pub use retry::{RetryController, RetryOutcome};

/// 이벤트 payload 해석부터 provider 호출, 코멘트 게시까지 전체 흐름을 조율한다.
pub struct ReviewPrUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub credentials: &'a dyn CredentialResolver,
    pub trigger: &'a dyn TriggerSource,
    pub forge_factory: &'a dyn ForgeFactory,
    pub provider_factory: &'a dyn ProviderFactory,
    pub renderer: &'a dyn CommentRenderer,
    pub reporter: &'a dyn Reporter,
}

impl<'a> ReviewPrUseCase<'a> {
    /// 리뷰 본 실행 진입점.
    /// 재시도 한도를 모두 소진하면 마지막 오류를 반환한다(프로세스는 실패 코드로 종료).
    pub async fn execute(&self, options: RunOptions) -> Result<ReviewOutcome> {
        self.reporter.section("Session");
        self.reporter.kv(
            "Mode",
            if options.dry_run {
                "dry-run"
            } else {
                "post-comment"
            },
        );

        let ctx = load_execution_context(self, &options)?;

        let Some(request) = fetch_review_request(self, &ctx).await else {
            return Ok(ReviewOutcome::NoChanges);
        };

        let provider = build_provider(self, &ctx)?;
        let prompt = build_prompt(&request.diff, ctx.config.max_diff_chars());

        let controller = RetryController::new(ctx.config.max_attempts());
        let (ctx_ref, provider_ref, prompt_ref, options_ref) =
            (&ctx, provider.as_ref(), prompt.as_str(), &options);
        let outcome = controller
            .run(move |attempt| {
                run_attempt(self, ctx_ref, provider_ref, prompt_ref, options_ref, attempt)
            })
            .await;

        match outcome {
            RetryOutcome::Succeeded { attempts, .. } => {
                self.reporter.section("Done");
                Ok(ReviewOutcome::Published { attempts })
            }
            RetryOutcome::ExhaustedFailure {
                attempts,
                last_error,
            } => Err(last_error.context(format!(
                "review for {} could not be delivered after {attempts} attempt(s)",
                request.target.display_name()
            ))),
        }
    }
}
