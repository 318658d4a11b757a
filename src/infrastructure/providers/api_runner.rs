//! Provider HTTP API 호출 공용 유틸리티.

use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::domain::error::ReviewError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Provider API 호출용 기본 HTTP 클라이언트를 생성한다.
pub fn build_api_client() -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// JSON 응답을 기대하는 요청을 전송한다. 전송/상태/파싱 실패는 모두 `ProviderFailure`.
pub async fn send_json(
    provider_name: &str,
    action: &str,
    request: RequestBuilder,
) -> Result<Value> {
    let response = request.send().await.map_err(|err| {
        ReviewError::ProviderFailure(format!("{provider_name}: failed to {action}: {err}"))
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|err| {
        ReviewError::ProviderFailure(format!(
            "{provider_name}: failed to read {action} response body: {err}"
        ))
    })?;

    if !status.is_success() {
        return Err(ReviewError::ProviderFailure(format!(
            "{provider_name}: {action} failed ({status}): {body}"
        ))
        .into());
    }

    let value = serde_json::from_str(&body).map_err(|err| {
        ReviewError::ProviderFailure(format!(
            "{provider_name}: invalid JSON response while {action}: {err}"
        ))
    })?;
    Ok(value)
}

/// API 응답 구조에서 텍스트를 재귀적으로 추출한다.
pub fn collect_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.to_string(),
        Value::Array(items) => items
            .iter()
            .map(collect_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(""),
        Value::Object(map) => {
            if let Some(text) = map.get("text").and_then(Value::as_str) {
                return text.to_string();
            }
            map.get("parts").map(collect_text).unwrap_or_default()
        }
        _ => String::new(),
    }
}
