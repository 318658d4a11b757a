//! 마크다운 렌더링 포트 구현 어댑터.

use crate::application::ports::CommentRenderer;
use crate::domain::review::{RawCompletion, RenderedComment, ReviewResult, TokenUsage};
use crate::infrastructure::render;

/// 마크다운 렌더링 어댑터.
pub struct MarkdownRendererAdapter;

impl CommentRenderer for MarkdownRendererAdapter {
    fn render(&self, result: &ReviewResult, raw: &RawCompletion) -> RenderedComment {
        render::render_comment(result, raw)
    }

    fn format_usage(&self, usage: &TokenUsage) -> String {
        render::format_usage(usage)
    }
}
