//! 설정 파일 탐색/병합 결과와 실효값을 확인하는 유스케이스.

use anyhow::Result;
use serde::Serialize;

use crate::application::config::Config;
use crate::application::ports::{ConfigRepository, CredentialResolver};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub effective: EffectiveSettings,
}

/// 기본값이 반영된 최종 값. 비밀값은 해석 여부만 노출한다.
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    pub model: String,
    pub provider_api_base: String,
    pub provider_api_key_env: String,
    pub provider_api_key_resolved: bool,
    pub forge_api_base: String,
    pub forge_token_env: String,
    pub forge_token_resolved: bool,
    pub max_diff_chars: usize,
    pub max_attempts: u32,
    pub server_port: u16,
}

pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub credentials: &'a dyn CredentialResolver,
}

impl<'a> InspectConfigUseCase<'a> {
    /// 설정 점검 결과를 pretty JSON 문자열로 생성한다.
    pub fn execute(&self) -> Result<String> {
        let sources = self.config_repo.sources()?;
        let config = self.config_repo.load()?;

        let inspection = ConfigInspection {
            searched_paths: sources.searched_paths,
            loaded_paths: sources.loaded_paths,
            effective: self.effective(&config),
        };
        Ok(serde_json::to_string_pretty(&inspection)?)
    }

    fn effective(&self, config: &Config) -> EffectiveSettings {
        EffectiveSettings {
            model: config.model().to_string(),
            provider_api_base: config.provider_api_base().to_string(),
            provider_api_key_env: config.provider.api_key_env().to_string(),
            provider_api_key_resolved: self
                .credentials
                .provider_api_key(&config.provider)
                .is_some(),
            forge_api_base: config.forge_api_base().to_string(),
            forge_token_env: config.forge.token_env().to_string(),
            forge_token_resolved: self.credentials.forge_token(&config.forge).is_some(),
            max_diff_chars: config.max_diff_chars(),
            max_attempts: config.max_attempts(),
            server_port: config.server_port(),
        }
    }
}
