//! 서비스 모드용 단건 분석 유스케이스.
//! URL로 지정된 PR을 리뷰하고 결과를 동기로 돌려준다(코멘트 게시 없음, 재시도 없음).

use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::application::config::Config;
use crate::application::ports::{CredentialResolver, ForgeFactory, ProviderFactory};
use crate::domain::error::ReviewError;
use crate::domain::policy::build_prompt;
use crate::domain::review::{ReviewResult, TokenUsage};
use crate::domain::target::PullRequestTarget;
use crate::domain::validation::validate_response;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionInfo {
    pub version: String,
    pub usage: TokenUsage,
    pub elapsed_seconds: f64,
}

/// diff가 비어 있으면 두 필드 모두 None.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub review: Option<ReviewResult>,
    pub model: Option<CompletionInfo>,
}

pub struct AnalyzePrUseCase<'a> {
    pub config: &'a Config,
    pub credentials: &'a dyn CredentialResolver,
    pub forge_factory: &'a dyn ForgeFactory,
    pub provider_factory: &'a dyn ProviderFactory,
}

impl<'a> AnalyzePrUseCase<'a> {
    pub async fn execute(&self, url: &str) -> Result<Analysis> {
        let target = PullRequestTarget::parse_url(url, self.config.forge_api_base())?;
        let token = self.credentials.forge_token(&self.config.forge);
        let forge = self.forge_factory.build(&target, token);

        let diff = forge
            .fetch_diff()
            .await
            .map_err(|err| ReviewError::DiffUnavailable(format!("{err:#}")))?;
        if diff.trim().is_empty() {
            info!(target_pr = %target.display_name(), "no diff found");
            return Ok(Analysis {
                review: None,
                model: None,
            });
        }

        let api_key = self
            .credentials
            .provider_api_key(&self.config.provider)
            .with_context(|| {
                format!(
                    "missing provider API key ({})",
                    self.config.provider.api_key_env()
                )
            })?;
        let provider = self.provider_factory.build(self.config, api_key);
        let prompt = build_prompt(&diff, self.config.max_diff_chars());

        let started = Instant::now();
        let response = provider.generate(&prompt).await?;
        let elapsed_seconds = started.elapsed().as_secs_f64();

        let review = validate_response(&response.text).map_err(ReviewError::from)?;
        info!(
            target_pr = %target.display_name(),
            suggestions = review.suggestions.len(),
            elapsed_seconds,
            "analysis completed"
        );

        Ok(Analysis {
            review: Some(review),
            model: Some(CompletionInfo {
                version: response.model_version,
                usage: response.usage,
                elapsed_seconds,
            }),
        })
    }
}
