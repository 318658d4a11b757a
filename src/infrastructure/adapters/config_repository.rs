//! 설정 저장소 포트 구현 어댑터.

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{ConfigRepository, ConfigSources};
use crate::infrastructure::config;

/// JSON 기반 설정 저장소 어댑터.
pub struct JsonConfigRepository;

impl ConfigRepository for JsonConfigRepository {
    fn load(&self) -> Result<Config> {
        config::load()
    }

    fn sources(&self) -> Result<ConfigSources> {
        let loaded = config::load_with_sources()?;
        let to_strings = |paths: Vec<std::path::PathBuf>| {
            paths
                .into_iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
        };

        Ok(ConfigSources {
            searched_paths: to_strings(loaded.searched_paths),
            loaded_paths: to_strings(loaded.loaded_paths),
        })
    }
}
