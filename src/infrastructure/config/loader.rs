//! 설정 파일 탐색/병합 로더.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::application::config::Config;

const CONFIG_ENV: &str = "PRREVIEW_CONFIG";
const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub config: Config,
    pub searched_paths: Vec<PathBuf>,
    pub loaded_paths: Vec<PathBuf>,
}

/// 우선순위 경로를 순회해 JSON 설정을 병합하고 환경변수 override를 적용한다.
pub(crate) fn load_merged_config() -> Result<LoadedConfig> {
    let paths = config_paths();
    load_from_paths(paths, |name| env::var(name).ok())
}

pub(crate) fn load_from_paths(
    paths: Vec<PathBuf>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<LoadedConfig> {
    // 낮은 우선순위에서 높은 우선순위 순서로 병합한다.
    let mut merged = Config::default();
    let mut loaded_paths = Vec::new();

    for path in &paths {
        if !path.exists() {
            continue;
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let parsed: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
        merged.merge_from(parsed);
        loaded_paths.push(path.to_path_buf());
    }

    apply_env_overrides(&mut merged, &lookup);

    Ok(LoadedConfig {
        config: merged,
        searched_paths: paths,
        loaded_paths,
    })
}

/// 배포 환경에서 주어지는 값은 파일 설정보다 우선한다.
/// `PORT`는 서비스 리스너 전용이므로 해석할 수 없는 값은 경고 후 무시한다.
fn apply_env_overrides(config: &mut Config, lookup: &impl Fn(&str) -> Option<String>) {
    let Some(raw) = lookup(PORT_ENV).filter(|v| !v.trim().is_empty()) else {
        return;
    };
    match raw.trim().parse::<u16>() {
        Ok(port) => config.server.port = Some(port),
        Err(err) => warn!(value = %raw, error = %err, "ignoring invalid {PORT_ENV} value"),
    }
}

/// 시스템 + 사용자 + 프로젝트 + 명시 경로 순으로 병합 경로를 구성한다.
pub(crate) fn config_paths() -> Vec<PathBuf> {
    let explicit = env::var(CONFIG_ENV).ok().filter(|v| !v.trim().is_empty());
    build_config_paths(dirs::config_dir(), explicit)
}

fn build_config_paths(
    user_config_dir: Option<PathBuf>,
    explicit: Option<String>,
) -> Vec<PathBuf> {
    // 낮은 우선순위 -> 높은 우선순위 순서로 병합됨.
    let mut paths = vec![PathBuf::from("/etc/prreview/config.json")];

    if let Some(base) = user_config_dir {
        paths.push(base.join("prreview").join("config.json"));
    }

    paths.push(PathBuf::from(".prreview/config.json"));

    if let Some(path) = explicit {
        paths.push(Path::new(&path).to_path_buf());
    }

    dedup_paths(paths)
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}
