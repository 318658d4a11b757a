//! 리뷰 도메인 엔티티/값 객체.

use std::str::FromStr;

use serde::Serialize;

use crate::domain::target::PullRequestTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// 코멘트를 게시하지 않고 렌더링 결과만 출력한다.
    pub dry_run: bool,
}

/// 한 번의 실행 동안 고정되는 리뷰 요청(잘린 diff 포함).
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub target: PullRequestTarget,
    pub diff: String,
}

/// provider가 보고한 토큰 사용량. 누락된 항목은 None.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub candidate_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
    pub thought_tokens: Option<u64>,
}

/// provider 원본 응답과 메타데이터. 한 attempt 안에서만 사용된다.
#[derive(Debug, Clone)]
pub struct RawCompletion {
    pub text: String,
    pub model_version: String,
    pub usage: TokenUsage,
    pub elapsed_secs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Security,
    Performance,
    Readability,
    Maintainability,
    Style,
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Performance => "performance",
            Self::Readability => "readability",
            Self::Maintainability => "maintainability",
            Self::Style => "style",
            Self::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    /// 대소문자와 앞뒤 공백은 무시한다.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "security" => Ok(Self::Security),
            "performance" => Ok(Self::Performance),
            "readability" => Ok(Self::Readability),
            "maintainability" => Ok(Self::Maintainability),
            "style" => Ok(Self::Style),
            "other" => Ok(Self::Other),
            _ => Err(format!("unknown category '{raw}'")),
        }
    }
}

/// 검증을 통과한 개별 지적 사항.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub issue: String,
    /// 1(critical) ~ 5(trivial)
    pub severity: u8,
    pub category: Category,
    pub file_path: String,
    pub line_number: u64,
    pub code_snippet: String,
    pub recommendation: String,
}

/// 검증된 리뷰 결과. 제안 순서는 provider가 준 순서를 그대로 유지한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewResult {
    pub summary: String,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedComment {
    pub body: String,
}

/// one-shot 실행 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// diff가 비어 있어 아무 것도 하지 않음
    NoChanges,
    /// 코멘트 게시(또는 dry-run 출력) 완료
    Published { attempts: u32 },
}
