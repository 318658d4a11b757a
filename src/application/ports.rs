//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::{Config, ForgeConfig, ProviderConfig};
use crate::domain::review::{RawCompletion, RenderedComment, ReviewResult, TokenUsage};
use crate::domain::target::PullRequestTarget;

/// 설정 파일 탐색 결과(낮은 우선순위 → 높은 우선순위).
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
}

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn sources(&self) -> Result<ConfigSources>;
}

/// 비밀값(토큰/API key) 해석 포트.
pub trait CredentialResolver: Send + Sync {
    fn forge_token(&self, forge: &ForgeConfig) -> Option<String>;
    fn provider_api_key(&self, provider: &ProviderConfig) -> Option<String>;
}

/// 실행을 촉발한 이벤트(GitHub Actions)에서 리뷰 대상을 찾는 포트.
pub trait TriggerSource: Send + Sync {
    fn load_target(&self, api_base: &str) -> Result<PullRequestTarget>;
}

/// 하나의 PR에 묶인 forge(GitHub) 연동 포트.
#[async_trait]
pub trait ForgeGateway: Send + Sync {
    /// 변경 파일 patch를 이어 붙인 unified diff. 빈 문자열이면 변경 없음.
    async fn fetch_diff(&self) -> Result<String>;
    /// PR 토론 스레드에 코멘트를 하나 생성한다.
    async fn publish_comment(&self, body: &str) -> Result<()>;
}

/// 대상/토큰에 맞는 forge 게이트웨이를 생성하는 팩토리 포트.
pub trait ForgeFactory: Send + Sync {
    fn build(&self, target: &PullRequestTarget, token: Option<String>) -> Box<dyn ForgeGateway>;
}

/// provider가 돌려준 원본 텍스트와 메타데이터(시간 측정 전).
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub model_version: String,
    pub usage: TokenUsage,
}

/// LLM completion provider 포트.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse>;
}

/// 설정/API key로 provider를 구성하는 팩토리 포트.
pub trait ProviderFactory: Send + Sync {
    fn build(&self, config: &Config, api_key: String) -> Box<dyn CompletionProvider>;
}

/// 리뷰 코멘트 렌더링 포트.
pub trait CommentRenderer: Send + Sync {
    fn render(&self, result: &ReviewResult, raw: &RawCompletion) -> RenderedComment;
    fn format_usage(&self, usage: &TokenUsage) -> String;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn raw(&self, line: &str);
}
