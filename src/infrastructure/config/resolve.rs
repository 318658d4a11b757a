//! 설정 값(inline/env)을 실제 런타임 비밀값으로 해석하는 유틸리티.
//!
//! - 환경변수 조회는 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::{ForgeConfig, ProviderConfig};

/// forge(GitHub) 토큰을 해석한다. inline 값이 환경변수보다 우선한다.
pub fn resolve_forge_token(forge: &ForgeConfig) -> Option<String> {
    resolve_secret(forge.token.as_deref(), forge.token_env(), |name| {
        env::var(name).ok()
    })
}

/// provider API key를 해석한다. inline 값이 환경변수보다 우선한다.
pub fn resolve_provider_api_key(provider: &ProviderConfig) -> Option<String> {
    resolve_secret(provider.api_key.as_deref(), provider.api_key_env(), |name| {
        env::var(name).ok()
    })
}

pub(crate) fn resolve_secret(
    inline: Option<&str>,
    env_name: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    if let Some(value) = inline.map(str::trim).filter(|v| !v.is_empty()) {
        return Some(value.to_string());
    }

    let env_name = env_name.trim();
    if env_name.is_empty() {
        return None;
    }

    lookup(env_name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(name: &'static str, value: &'static str) -> impl Fn(&str) -> Option<String> {
        move |key| (key == name).then(|| value.to_string())
    }

    #[test]
    fn inline_value_wins_over_env() {
        let token = resolve_secret(Some(" inline "), "TOKEN", env_with("TOKEN", "from-env"));
        assert_eq!(token.as_deref(), Some("inline"));
    }

    #[test]
    fn falls_back_to_env() {
        let token = resolve_secret(None, "TOKEN", env_with("TOKEN", " from-env\n"));
        assert_eq!(token.as_deref(), Some("from-env"));
    }

    #[test]
    fn blank_values_count_as_missing() {
        assert!(resolve_secret(Some("  "), "TOKEN", env_with("TOKEN", "")).is_none());
        assert!(resolve_secret(None, "OTHER", env_with("TOKEN", "x")).is_none());
        assert!(resolve_secret(None, " ", env_with("TOKEN", "x")).is_none());
    }
}
