//! Hosted-inference summarizer backend.
//!
//! One POST per invocation to `{base}/models/{model}` with bearer auth and a
//! JSON body of `{inputs, parameters, options}`. Transient failures (429,
//! 5xx, transport errors) are retried with exponential backoff; other HTTP
//! errors propagate to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::summarize::{
    DecodingParams, Summarizer, SummarizerError, TokenBudget, MAX_INPUT_TOKENS, TASK_PREFIX,
};

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a DecodingParams,
    options: InferenceOptions,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct SummaryItem {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
struct InferenceErrorBody {
    error: String,
}

/// Summarizer backed by a hosted inference endpoint.
pub struct RemoteSummarizer {
    client: Client,
    endpoint: String,
    api_token: String,
    params: DecodingParams,
    options: InferenceOptions,
    budget: TokenBudget,
}

impl RemoteSummarizer {
    pub fn from_config(config: &Config) -> Self {
        let endpoint = format!(
            "{}/models/{}",
            config.hf_api_base.trim_end_matches('/'),
            config.summarizer_model
        );
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            api_token: config.hf_api_token.clone(),
            params: DecodingParams::default(),
            options: InferenceOptions {
                wait_for_model: config.summarizer_wait_for_model,
            },
            budget: TokenBudget::from_tokenizer_path(
                config.summarizer_tokenizer_path.as_deref(),
                MAX_INPUT_TOKENS,
            ),
        }
    }

    /// Makes the inference call, retrying on 429 and 5xx with exponential
    /// backoff (1s, 2s, 4s).
    async fn call(&self, inputs: &str) -> Result<String, SummarizerError> {
        let request_body = InferenceRequest {
            inputs,
            parameters: &self.params,
            options: self.options,
        };

        let mut last_error: Option<SummarizerError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Summarization attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_token)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(SummarizerError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Inference API returned {}: {}", status, body);
                last_error = Some(SummarizerError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<InferenceErrorBody>(&body)
                    .map(|e| e.error)
                    .unwrap_or(body);
                return Err(SummarizerError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let items: Vec<SummaryItem> = response.json().await?;
            return items
                .into_iter()
                .next()
                .map(|item| item.summary_text.trim().to_string())
                .filter(|s| !s.is_empty())
                .ok_or(SummarizerError::EmptyContent);
        }

        Err(last_error.unwrap_or(SummarizerError::Exhausted {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl Summarizer for RemoteSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizerError> {
        let truncated = self.budget.truncate(text);
        let inputs = format!("{TASK_PREFIX}{truncated}");
        let summary = self.call(&inputs).await?;
        debug!("Summarization succeeded ({} chars)", summary.len());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_wire_shape() {
        let params = DecodingParams::default();
        let request = InferenceRequest {
            inputs: "summarize: some resume text",
            parameters: &params,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"], "summarize: some resume text");
        assert_eq!(json["parameters"]["max_length"], 150);
        assert_eq!(json["parameters"]["num_beams"], 4);
        assert_eq!(json["options"]["wait_for_model"], true);
    }

    #[test]
    fn test_summary_response_parses() {
        let body = r#"[{"summary_text": "Jane is a software engineer with ten years of experience."}]"#;
        let items: Vec<SummaryItem> = serde_json::from_str(body).unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].summary_text.starts_with("Jane"));
    }

    #[test]
    fn test_empty_response_array_is_empty_content() {
        let items: Vec<SummaryItem> = serde_json::from_str("[]").unwrap();
        let summary = items
            .into_iter()
            .next()
            .map(|item| item.summary_text)
            .ok_or(SummarizerError::EmptyContent);
        assert!(matches!(summary, Err(SummarizerError::EmptyContent)));
    }

    #[test]
    fn test_error_body_parses() {
        let body = r#"{"error": "Model facebook/bart-large-cnn is currently loading"}"#;
        let parsed: InferenceErrorBody = serde_json::from_str(body).unwrap();
        assert!(parsed.error.contains("loading"));
    }

    #[test]
    fn test_endpoint_built_from_base_and_model() {
        let base = "https://api-inference.huggingface.co/";
        let endpoint = format!(
            "{}/models/{}",
            base.trim_end_matches('/'),
            "facebook/bart-large-cnn"
        );
        assert_eq!(
            endpoint,
            "https://api-inference.huggingface.co/models/facebook/bart-large-cnn"
        );
    }
}
