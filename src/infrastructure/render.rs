//! PR 코멘트용 Markdown 렌더링 모듈.
//! 검증된 결과와 provider 메타데이터만 입력으로 받는 순수 함수들이다.

use std::fmt::Write as _;

use crate::domain::review::{RawCompletion, RenderedComment, ReviewResult, Suggestion, TokenUsage};

const SNIPPET_PLACEHOLDER: &str = "// Code snippet not provided.";

/// 리뷰 결과 전체를 하나의 코멘트 본문으로 렌더링한다.
pub fn render_comment(result: &ReviewResult, raw: &RawCompletion) -> RenderedComment {
    let mut out = String::new();
    out.push_str("# AI PR REVIEW BOT\n\n");
    out.push_str(&result.summary);
    out.push_str("\n\n---\n\n");
    out.push_str("### 💡 **Suggestions**\n");

    if result.suggestions.is_empty() {
        out.push_str("\n_No actionable issues found._\n\n---\n");
    }
    for (idx, suggestion) in result.suggestions.iter().enumerate() {
        render_suggestion(&mut out, idx + 1, suggestion);
    }

    out.push('\n');
    out.push_str(&render_model_info(raw));
    RenderedComment { body: out }
}

fn render_suggestion(out: &mut String, position: usize, s: &Suggestion) {
    let snippet = if s.code_snippet.is_empty() {
        SNIPPET_PLACEHOLDER
    } else {
        s.code_snippet.as_str()
    };

    // 마크다운 줄바꿈을 위해 일부 줄 끝의 공백 두 칸을 유지한다.
    let _ = write!(
        out,
        "\n#### {position}. **[{category}]** — {issue}\n\n\
         > **Severity:** {severity}/5  \n\
         > **File Path:** `{path}`  \n\
         > **Line Number:** {line}\n\n\
         **Code Snippet:**  \n\
         ```\n{snippet}\n```\n\n\
         **🛠 Recommendation:**  \n\
         {recommendation}\n\n---\n",
        category = s.category.as_str().to_uppercase(),
        issue = s.issue,
        severity = s.severity,
        path = s.file_path,
        line = s.line_number,
        recommendation = s.recommendation,
    );
}

/// 모델 버전/토큰 사용량/응답 시간 푸터.
pub fn render_model_info(raw: &RawCompletion) -> String {
    let usage = &raw.usage;
    format!(
        "**Model Info:**\n\
         - Version: {}\n\
         - Prompt Tokens: {}\n\
         - Candidates Tokens: {}\n\
         - Total Tokens: {}\n\
         - Thoughts Tokens: {}\n\
         - Model Response Time: {:.1}s\n",
        raw.model_version,
        opt_num(usage.prompt_tokens),
        opt_num(usage.candidate_tokens),
        opt_num(usage.total_tokens),
        opt_num(usage.thought_tokens),
        raw.elapsed_secs,
    )
}

/// 토큰 사용량을 콘솔 표기용 문자열로 변환한다.
pub fn format_usage(usage: &TokenUsage) -> String {
    format!(
        "prompt={}, candidates={}, total={}, thoughts={}",
        opt_num(usage.prompt_tokens),
        opt_num(usage.candidate_tokens),
        opt_num(usage.total_tokens),
        opt_num(usage.thought_tokens)
    )
}

fn opt_num(value: Option<u64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}
