//! 애플리케이션 조립(composition root) 모듈.

use crate::application::config::Config;
use crate::application::usecases::analyze_pr::AnalyzePrUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::review_pr::ReviewPrUseCase;
use crate::infrastructure::adapters::{
    ConsoleReporter, EnvCredentialResolver, ForgeFactoryAdapter, GitHubEventTrigger,
    JsonConfigRepository, MarkdownRendererAdapter, ProviderFactoryAdapter,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    pub config_repo: JsonConfigRepository,
    credentials: EnvCredentialResolver,
    trigger: GitHubEventTrigger,
    forge_factory: ForgeFactoryAdapter,
    provider_factory: ProviderFactoryAdapter,
    renderer: MarkdownRendererAdapter,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            credentials: EnvCredentialResolver,
            trigger: GitHubEventTrigger,
            forge_factory: ForgeFactoryAdapter,
            provider_factory: ProviderFactoryAdapter,
            renderer: MarkdownRendererAdapter,
            reporter: ConsoleReporter,
        }
    }
}

impl AppComposition {
    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
            credentials: &self.credentials,
        }
    }

    /// 리뷰 실행(one-shot) 유스케이스를 생성한다.
    pub fn review_usecase(&self) -> ReviewPrUseCase<'_> {
        ReviewPrUseCase {
            config_repo: &self.config_repo,
            credentials: &self.credentials,
            trigger: &self.trigger,
            forge_factory: &self.forge_factory,
            provider_factory: &self.provider_factory,
            renderer: &self.renderer,
            reporter: &self.reporter,
        }
    }

    /// 서비스 모드 단건 분석 유스케이스를 생성한다.
    pub fn analyze_usecase<'a>(&'a self, config: &'a Config) -> AnalyzePrUseCase<'a> {
        AnalyzePrUseCase {
            config,
            credentials: &self.credentials,
            forge_factory: &self.forge_factory,
            provider_factory: &self.provider_factory,
        }
    }
}
