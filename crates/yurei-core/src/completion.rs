//! Provider-agnostic completion request and response types.

use crate::message::MessageEntry;
use serde::{Deserialize, Serialize};

/// Sampling parameters sent with each completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(default)]
    pub stop: Vec<String>,
    #[serde(default)]
    pub stream: bool,
}

impl GenerationParams {
    /// Parameters for a conversational turn.
    pub fn conversation() -> Self {
        Self {
            max_tokens: 100,
            temperature: 0.5,
            frequency_penalty: Some(0.0),
            presence_penalty: Some(0.0),
            stop: vec!["\n".to_string()],
            stream: false,
        }
    }

    /// Parameters for the periodic broadcast, slightly more creative.
    pub fn broadcast() -> Self {
        Self {
            max_tokens: 100,
            temperature: 0.7,
            frequency_penalty: None,
            presence_penalty: None,
            stop: vec!["\n".to_string()],
            stream: false,
        }
    }
}

/// Everything a provider needs for one call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Full conversation, oldest first.
    pub messages: Vec<MessageEntry>,
    pub params: GenerationParams,
}

/// The first candidate returned by a provider.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    pub text: String,
    /// Model identifier reported by the API (if any).
    pub model: Option<String>,
    /// Token count (if available from the provider).
    pub tokens_used: Option<u64>,
    /// Wall-clock time of the call in milliseconds.
    pub processing_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_params() {
        let p = GenerationParams::conversation();
        assert_eq!(p.max_tokens, 100);
        assert_eq!(p.temperature, 0.5);
        assert_eq!(p.frequency_penalty, Some(0.0));
        assert_eq!(p.stop, vec!["\n"]);
        assert!(!p.stream);
    }

    #[test]
    fn test_broadcast_params_omit_penalties() {
        let p = GenerationParams::broadcast();
        assert_eq!(p.temperature, 0.7);
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("frequency_penalty").is_none());
        assert!(json.get("presence_penalty").is_none());
        assert_eq!(json["max_tokens"], 100);
    }
}
