//! Provider 포트 구현 어댑터.

use crate::application::config::Config;
use crate::application::ports::{CompletionProvider, ProviderFactory};
use crate::infrastructure::providers;

/// Provider 팩토리 어댑터.
pub struct ProviderFactoryAdapter;

impl ProviderFactory for ProviderFactoryAdapter {
    fn build(&self, config: &Config, api_key: String) -> Box<dyn CompletionProvider> {
        providers::build_provider(config, api_key)
    }
}
