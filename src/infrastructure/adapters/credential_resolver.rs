//! 비밀값(토큰/API key) 해석 포트 구현.

use crate::application::config::{ForgeConfig, ProviderConfig};
use crate::application::ports::CredentialResolver;
use crate::infrastructure::config::{resolve_forge_token, resolve_provider_api_key};

/// 설정(inline/env)에 기반해 런타임 비밀값을 해석한다.
pub struct EnvCredentialResolver;

impl CredentialResolver for EnvCredentialResolver {
    fn forge_token(&self, forge: &ForgeConfig) -> Option<String> {
        resolve_forge_token(forge)
    }

    fn provider_api_key(&self, provider: &ProviderConfig) -> Option<String> {
        resolve_provider_api_key(provider)
    }
}
