//! Message sending: reply, push, and profile lookup.

use super::types::LineProfile;
use super::LineChannel;
use crate::utils::split_message;
use serde_json::{json, Value};
use tracing::{debug, warn};
use yurei_core::error::YureiError;

/// Maximum characters in one text message object.
pub(crate) const MAX_TEXT_CHARS: usize = 5000;

/// Maximum message objects in one reply or push request.
pub(crate) const MAX_MESSAGES: usize = 5;

/// Build the `messages` array, splitting long texts and capping the count.
pub(crate) fn build_text_messages(texts: &[String]) -> Vec<Value> {
    let chunks: Vec<&str> = texts
        .iter()
        .flat_map(|t| split_message(t, MAX_TEXT_CHARS))
        .collect();
    if chunks.len() > MAX_MESSAGES {
        warn!(
            "line: dropping {} message bubbles over the limit of {MAX_MESSAGES}",
            chunks.len() - MAX_MESSAGES
        );
    }
    chunks
        .into_iter()
        .take(MAX_MESSAGES)
        .map(|text| json!({ "type": "text", "text": text }))
        .collect()
}

impl LineChannel {
    /// Answer an event with its one-time reply token.
    pub(crate) async fn reply_message(
        &self,
        reply_token: &str,
        texts: &[String],
    ) -> Result<(), YureiError> {
        let body = json!({
            "replyToken": reply_token,
            "messages": build_text_messages(texts),
        });
        self.post("message/reply", &body).await
    }

    /// Send to a user id without a prior event.
    pub(crate) async fn push_message(&self, to: &str, texts: &[String]) -> Result<(), YureiError> {
        let body = json!({
            "to": to,
            "messages": build_text_messages(texts),
        });
        self.post("message/push", &body).await
    }

    /// Fetch a user's display name.
    pub(crate) async fn get_profile(&self, user_id: &str) -> Result<String, YureiError> {
        let url = format!("{}/profile/{user_id}", self.base_url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| YureiError::Channel(format!("line profile request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(YureiError::Channel(format!(
                "line profile failed ({status}): {error_text}"
            )));
        }

        let profile: LineProfile = resp
            .json()
            .await
            .map_err(|e| YureiError::Channel(format!("line profile: bad response: {e}")))?;
        Ok(profile.display_name)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<(), YureiError> {
        let url = format!("{}/{path}", self.base_url);
        debug!("line: POST {url}");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await
            .map_err(|e| YureiError::Channel(format!("line {path} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(YureiError::Channel(format!(
                "line {path} failed ({status}): {error_text}"
            )));
        }

        Ok(())
    }
}
