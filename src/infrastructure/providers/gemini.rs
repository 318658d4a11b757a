//! Google Gemini provider 어댑터.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use url::Url;

use crate::application::config::Config;
use crate::application::ports::{CompletionProvider, ProviderResponse};
use crate::domain::error::ReviewError;
use crate::domain::review::TokenUsage;

use super::api_runner::{build_api_client, collect_text, send_json};

pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
    credential: String,
}

impl GeminiProvider {
    pub fn new(config: &Config, credential: String) -> Self {
        Self {
            client: build_api_client(),
            base_url: config.provider_api_base().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
            credential,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<ProviderResponse> {
        let payload = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [
                        { "text": prompt }
                    ]
                }
            ],
            "generationConfig": {
                "responseMimeType": "application/json"
            }
        });

        // Gemini는 API key(query) 또는 OAuth(Bearer) 방식 모두 허용한다.
        let request = if self.credential.starts_with("AIza") {
            let mut url = Url::parse(&self.endpoint()).map_err(|err| {
                ReviewError::ProviderFailure(format!("Gemini: invalid endpoint: {err}"))
            })?;
            url.query_pairs_mut().append_pair("key", &self.credential);
            self.client.post(url).json(&payload)
        } else {
            self.client
                .post(self.endpoint())
                .bearer_auth(&self.credential)
                .json(&payload)
        };

        let response = send_json(self.name(), "request Gemini API", request).await?;
        parse_generate_response(&response, &self.model)
    }
}

/// generateContent 응답에서 텍스트/모델 버전/사용량을 추출한다.
fn parse_generate_response(response: &Value, configured_model: &str) -> Result<ProviderResponse> {
    let text = response
        .pointer("/candidates/0/content")
        .map(collect_text)
        .unwrap_or_default();
    if text.trim().is_empty() {
        let err = ReviewError::ProviderFailure("Gemini: empty response content".to_string());
        return Err(err.into());
    }

    let model_version = response
        .get("modelVersion")
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
        .unwrap_or(configured_model)
        .to_string();

    let counter = |name: &str| {
        response
            .pointer(&format!("/usageMetadata/{name}"))
            .and_then(Value::as_u64)
    };

    Ok(ProviderResponse {
        text,
        model_version,
        usage: TokenUsage {
            prompt_tokens: counter("promptTokenCount"),
            candidate_tokens: counter("candidatesTokenCount"),
            total_tokens: counter("totalTokenCount"),
            thought_tokens: counter("thoughtsTokenCount"),
        },
    })
}
