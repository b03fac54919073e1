//! Azure OpenAI chat-completions provider.
//!
//! Requests go to a named deployment:
//! `{endpoint}/openai/deployments/{model}/chat/completions?api-version={version}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use yurei_core::{
    completion::{Completion, CompletionRequest, GenerationParams},
    config::AzureOpenAiConfig,
    error::YureiError,
    message::MessageEntry,
    traits::Provider,
};

/// Azure-hosted OpenAI provider.
pub struct AzureOpenAiProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    model: String,
}

impl AzureOpenAiProvider {
    /// Create from config values.
    pub fn from_config(config: &AzureOpenAiConfig) -> Result<Self, YureiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| YureiError::Config(format!("azure-openai: failed to build client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
            model: config.model.clone(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            self.api_version
        )
    }
}

/// Build wire messages from transcript entries.
pub(crate) fn build_chat_messages(entries: &[MessageEntry]) -> Vec<ChatMessage> {
    entries
        .iter()
        .map(|e| ChatMessage {
            role: e.role.as_str().to_string(),
            content: vec![ContentPart {
                kind: "text".to_string(),
                text: e.text.clone(),
            }],
        })
        .collect()
}

#[derive(Serialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[derive(Serialize)]
pub(crate) struct ContentPart {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Serialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(flatten)]
    pub params: GenerationParams,
}

#[derive(Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Option<Vec<ChatChoice>>,
    pub model: Option<String>,
    pub usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
pub(crate) struct ChatChoice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
pub(crate) struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ChatUsage {
    pub total_tokens: Option<u64>,
}

/// Text of the first candidate, if the API returned a non-empty one.
pub(crate) fn first_candidate(resp: &ChatCompletionResponse) -> Option<String> {
    resp.choices
        .as_ref()
        .and_then(|c| c.first())
        .and_then(|c| c.message.as_ref())
        .and_then(|m| m.content.clone())
        .filter(|text| !text.is_empty())
}

#[async_trait]
impl Provider for AzureOpenAiProvider {
    fn name(&self) -> &str {
        "azure-openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, YureiError> {
        let start = Instant::now();
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: build_chat_messages(&request.messages),
            params: request.params.clone(),
        };

        let url = self.url();
        debug!(
            "azure-openai: POST {url} messages={}",
            request.messages.len()
        );

        let resp = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| YureiError::GenerationFailure(format!("azure-openai request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            warn!("azure-openai returned {status}");
            return Err(YureiError::GenerationFailure(format!(
                "azure-openai returned {status}: {text}"
            )));
        }

        let parsed: ChatCompletionResponse = resp.json().await.map_err(|e| {
            YureiError::GenerationFailure(format!("azure-openai: failed to parse response: {e}"))
        })?;

        let text = first_candidate(&parsed).ok_or_else(|| {
            YureiError::GenerationFailure("azure-openai returned no candidate".to_string())
        })?;

        Ok(Completion {
            text,
            model: parsed.model,
            tokens_used: parsed.usage.as_ref().and_then(|u| u.total_tokens),
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AzureOpenAiConfig {
        AzureOpenAiConfig {
            endpoint: "https://ghost.openai.azure.com/".into(),
            api_key: "k".into(),
            api_version: "2024-02-01".into(),
            model: "gpt-4o".into(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_provider_name_and_url() {
        let p = AzureOpenAiProvider::from_config(&test_config()).unwrap();
        assert_eq!(p.name(), "azure-openai");
        assert_eq!(
            p.url(),
            "https://ghost.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-02-01"
        );
    }

    #[test]
    fn test_build_chat_messages_uses_text_parts() {
        let entries = vec![
            MessageEntry::system("prelude"),
            MessageEntry::user("こんにちは"),
        ];
        let messages = build_chat_messages(&entries);
        let json = serde_json::to_value(&messages).unwrap();
        assert_eq!(json[0]["role"], "system");
        assert_eq!(json[1]["role"], "user");
        assert_eq!(json[1]["content"][0]["type"], "text");
        assert_eq!(json[1]["content"][0]["text"], "こんにちは");
    }

    #[test]
    fn test_request_body_flattens_params() {
        let body = ChatCompletionRequest {
            model: "gpt-4o".into(),
            messages: build_chat_messages(&[MessageEntry::user("hi")]),
            params: GenerationParams::conversation(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["max_tokens"], 100);
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["frequency_penalty"], 0.0);
        assert_eq!(json["presence_penalty"], 0.0);
        assert_eq!(json["stop"][0], "\n");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"元気ですか"},"finish_reason":"stop"}],"model":"gpt-4o","usage":{"total_tokens":42}}"#;
        let resp: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(first_candidate(&resp), Some("元気ですか".into()));
        assert_eq!(resp.usage.as_ref().and_then(|u| u.total_tokens), Some(42));
    }

    #[test]
    fn test_response_without_candidates() {
        let resp: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(first_candidate(&resp), None);

        let resp: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
                .unwrap();
        assert_eq!(first_candidate(&resp), None);

        // A stop sequence hit on the first token yields empty content.
        let resp: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":""}}]}"#)
                .unwrap();
        assert_eq!(first_candidate(&resp), None);
    }
}
