//! forge 게이트웨이 포트 구현 어댑터.

use crate::application::ports::{ForgeFactory, ForgeGateway};
use crate::domain::target::PullRequestTarget;
use crate::infrastructure::vcs;

/// forge 게이트웨이 팩토리 어댑터.
pub struct ForgeFactoryAdapter;

impl ForgeFactory for ForgeFactoryAdapter {
    fn build(&self, target: &PullRequestTarget, token: Option<String>) -> Box<dyn ForgeGateway> {
        vcs::build_forge_client(target, token)
    }
}
