//! LLM provider 구현 모듈.
//! HTTP API를 호출하고 응답 텍스트/사용량을 표준화한다.

mod api_runner;
pub mod gemini;

use crate::application::config::Config;
use crate::application::ports::CompletionProvider;

pub fn build_provider(config: &Config, api_key: String) -> Box<dyn CompletionProvider> {
    Box::new(gemini::GeminiProvider::new(config, api_key))
}
