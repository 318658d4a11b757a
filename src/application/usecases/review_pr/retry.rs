//! provider 호출~게시 구간을 감싸는 재시도 컨트롤러.
//!
//! Idle → Attempting(1) → … → Succeeded | ExhaustedFailure.
//! 실패 시 지연 없이 전체 구간을 처음부터 다시 실행한다. 이전 attempt의 응답은 재사용하지 않는다.

use std::future::Future;

use anyhow::Result;
use tracing::{error, warn};

/// 재시도 종료 상태.
#[derive(Debug)]
pub enum RetryOutcome<T> {
    Succeeded { value: T, attempts: u32 },
    ExhaustedFailure { attempts: u32, last_error: anyhow::Error },
}

#[derive(Debug, Clone, Copy)]
pub struct RetryController {
    max_attempts: u32,
}

impl RetryController {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// `attempt_fn`에 1부터 시작하는 시도 번호를 넘겨 성공하거나 한도에 도달할 때까지 실행한다.
    pub async fn run<T, F, Fut>(&self, mut attempt_fn: F) -> RetryOutcome<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match attempt_fn(attempt).await {
                Ok(value) => {
                    return RetryOutcome::Succeeded {
                        value,
                        attempts: attempt,
                    };
                }
                Err(err) if attempt < self.max_attempts => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %format!("{err:#}"),
                        "review attempt failed; retrying"
                    );
                    attempt += 1;
                }
                Err(err) => {
                    error!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %format!("{err:#}"),
                        "review attempt failed; retry budget exhausted"
                    );
                    return RetryOutcome::ExhaustedFailure {
                        attempts: attempt,
                        last_error: err,
                    };
                }
            }
        }
    }
}
