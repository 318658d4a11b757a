//! 실행 트리거 포트 구현 어댑터.

use anyhow::Result;

use crate::application::ports::TriggerSource;
use crate::domain::target::PullRequestTarget;
use crate::infrastructure::event;

/// GitHub Actions 이벤트 payload를 읽어 대상 PR을 만드는 어댑터.
pub struct GitHubEventTrigger;

impl TriggerSource for GitHubEventTrigger {
    fn load_target(&self, api_base: &str) -> Result<PullRequestTarget> {
        event::load_target(api_base)
    }
}
