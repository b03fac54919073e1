//! LINE Messaging API webhook and response types.

use serde::Deserialize;

/// Body of a webhook delivery.
#[derive(Debug, Deserialize)]
pub struct WebhookBody {
    /// Bot user id that received the events.
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub events: Vec<LineEvent>,
}

/// A webhook event. Only message events are modeled.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LineEvent {
    Message(MessageEvent),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    pub reply_token: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,
    pub source: LineSource,
    pub message: LineMessage,
}

/// Where the event came from.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LineSource {
    User {
        #[serde(rename = "userId")]
        user_id: String,
    },
    Group {
        #[serde(rename = "groupId")]
        group_id: String,
    },
    Room {
        #[serde(rename = "roomId")]
        room_id: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LineMessage {
    Text { id: String, text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LineProfile {
    pub display_name: String,
}
