//! 리뷰 파이프라인 오류 분류.
//! `DiffUnavailable`을 제외한 모든 종류는 재시도 컨트롤러에서 다시 시도된다.

use thiserror::Error;

/// provider 응답이 스키마를 만족하지 못한 이유.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("not JSON")]
    NotJson,
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid suggestion #{index}: {detail}")]
    InvalidSuggestion { index: usize, detail: String },
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("diff unavailable: {0}")]
    DiffUnavailable(String),

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: MalformedReason },

    #[error("provider failure: {0}")]
    ProviderFailure(String),

    #[error("failed to post comment: {status} {status_text}\n{body}")]
    PublishFailure {
        status: u16,
        status_text: String,
        body: String,
    },
}

impl From<MalformedReason> for ReviewError {
    fn from(reason: MalformedReason) -> Self {
        Self::MalformedResponse { reason }
    }
}
