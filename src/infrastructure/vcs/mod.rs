//! forge(VCS) 연동 계층.
//! 현재는 GitHub REST API 구현만 존재한다.

pub mod github;

use crate::application::ports::ForgeGateway;
use crate::domain::target::PullRequestTarget;

/// files API가 돌려주는 변경 파일 하나.
#[derive(Debug, Clone)]
pub struct ChangedFile {
    pub filename: String,
    /// 바이너리/대용량 파일은 patch가 없다.
    pub patch: Option<String>,
}

pub fn build_forge_client(
    target: &PullRequestTarget,
    token: Option<String>,
) -> Box<dyn ForgeGateway> {
    Box::new(github::GitHubClient::new(target.clone(), token))
}

/// 파일별 patch를 `diff --git` 헤더와 함께 하나의 unified diff로 이어 붙인다.
pub fn concat_patches(files: &[ChangedFile]) -> String {
    files
        .iter()
        .filter_map(|file| {
            let patch = file.patch.as_deref().filter(|p| !p.is_empty())?;
            Some(format!(
                "diff --git a/{0} b/{0}\n{1}",
                file.filename,
                patch.trim_end_matches('\n')
            ))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
