//! 사용자 설정(JSON) 로딩/병합 모듈.
//! 여러 경로의 설정을 우선순위대로 병합하고, 환경변수 override와 비밀값 해석을 담당한다.

mod loader;
mod resolve;

use anyhow::Result;

use crate::application::config::Config;

pub(crate) use loader::LoadedConfig;
pub use resolve::{resolve_forge_token, resolve_provider_api_key};

/// 병합된 최종 설정을 로딩한다.
pub fn load() -> Result<Config> {
    Ok(loader::load_merged_config()?.config)
}

/// 탐색/로딩 경로 정보를 포함해 설정을 로딩한다.
pub(crate) fn load_with_sources() -> Result<LoadedConfig> {
    loader::load_merged_config()
}
