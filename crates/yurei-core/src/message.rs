use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Speaker of a conversational turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire name used by the completion API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One turn of the conversation. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    pub role: Role,
    pub text: String,
}

impl MessageEntry {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Who sent an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    /// A one-to-one chat with a known user id.
    User(String),
    /// A group or room; the individual user is not resolvable.
    Unknown,
}

/// An incoming text message from a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub id: Uuid,
    /// Channel name (e.g. "line").
    pub channel: String,
    pub sender: Sender,
    /// Message text content.
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Request-scoped token used to answer this message.
    pub reply_token: Option<String>,
}

/// Where an outgoing message is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryTarget {
    /// Answer an inbound event with its one-time reply token.
    Reply(String),
    /// Push to a persistent recipient id.
    Push(String),
}

/// One or more text bubbles delivered in a single platform call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub texts: Vec<String>,
    pub target: DeliveryTarget,
}

impl OutgoingMessage {
    pub fn reply(token: impl Into<String>, texts: Vec<String>) -> Self {
        Self {
            texts,
            target: DeliveryTarget::Reply(token.into()),
        }
    }

    pub fn push(to: impl Into<String>, texts: Vec<String>) -> Self {
        Self {
            texts,
            target: DeliveryTarget::Push(to.into()),
        }
    }
}
