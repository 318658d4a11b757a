//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DIFF_CHARS: usize = 60_000;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_MODEL: &str = "gemini-flash-lite-latest";
pub const DEFAULT_PROVIDER_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PROVIDER_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_FORGE_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_FORGE_TOKEN_ENV: &str = "COMMENT_GITHUB_TOKEN";
pub const DEFAULT_SERVER_PORT: u16 = 3000;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 리뷰 파이프라인 한도
    #[serde(default)]
    pub review: ReviewConfig,
    /// completion provider(Gemini) 설정
    #[serde(default)]
    pub provider: ProviderConfig,
    /// GitHub API 설정
    #[serde(default)]
    pub forge: ForgeConfig,
    /// 서비스 모드 HTTP 리스너 설정
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReviewConfig {
    /// 프롬프트에 넣을 diff 최대 문자 수
    pub max_diff_chars: Option<usize>,
    /// provider 호출~게시까지의 최대 시도 횟수
    pub max_attempts: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    pub model: Option<String>,
    pub api_base: Option<String>,
    /// API key 직접값(민감정보: 권장하지 않음)
    pub api_key: Option<String>,
    /// API key를 읽을 환경변수 이름
    pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ForgeConfig {
    pub api_base: Option<String>,
    /// 토큰 직접값(민감정보: 권장하지 않음)
    pub token: Option<String>,
    /// 토큰을 읽을 환경변수 이름
    pub token_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub port: Option<u16>,
}

impl Config {
    pub fn max_diff_chars(&self) -> usize {
        self.review.max_diff_chars.unwrap_or(DEFAULT_MAX_DIFF_CHARS)
    }

    /// 0 이하 설정은 1회 시도로 취급한다.
    pub fn max_attempts(&self) -> u32 {
        self.review
            .max_attempts
            .unwrap_or(DEFAULT_MAX_ATTEMPTS)
            .max(1)
    }

    pub fn model(&self) -> &str {
        self.provider.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn provider_api_base(&self) -> &str {
        self.provider
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_PROVIDER_API_BASE)
            .trim_end_matches('/')
    }

    pub fn forge_api_base(&self) -> &str {
        self.forge
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_FORGE_API_BASE)
            .trim_end_matches('/')
    }

    pub fn server_port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_SERVER_PORT)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.review.merge_from(other.review);
        self.provider.merge_from(other.provider);
        self.forge.merge_from(other.forge);
        if other.server.port.is_some() {
            self.server.port = other.server.port;
        }
    }
}

impl ReviewConfig {
    fn merge_from(&mut self, other: ReviewConfig) {
        if other.max_diff_chars.is_some() {
            self.max_diff_chars = other.max_diff_chars;
        }
        if other.max_attempts.is_some() {
            self.max_attempts = other.max_attempts;
        }
    }
}

impl ProviderConfig {
    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or(DEFAULT_PROVIDER_API_KEY_ENV)
    }

    fn merge_from(&mut self, other: ProviderConfig) {
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
    }
}

impl ForgeConfig {
    pub fn token_env(&self) -> &str {
        self.token_env.as_deref().unwrap_or(DEFAULT_FORGE_TOKEN_ENV)
    }

    fn merge_from(&mut self, other: ForgeConfig) {
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.token_env.is_some() {
            self.token_env = other.token_env;
        }
    }
}
