//! Webhook body parsing.

use super::types::{LineEvent, LineMessage, LineSource, WebhookBody};
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;
use yurei_core::{
    error::YureiError,
    message::{IncomingMessage, Sender},
};

/// Extract text messages from a verified webhook body, in delivery order.
///
/// Non-message events and non-text messages are skipped.
pub fn parse_webhook(body: &str) -> Result<Vec<IncomingMessage>, YureiError> {
    let parsed: WebhookBody = serde_json::from_str(body)?;
    let mut messages = Vec::with_capacity(parsed.events.len());

    for event in parsed.events {
        let event = match event {
            LineEvent::Message(ev) => ev,
            LineEvent::Other => {
                debug!("line: skipping non-message event");
                continue;
            }
        };
        let text = match event.message {
            LineMessage::Text { text, .. } => text,
            LineMessage::Other => {
                debug!("line: skipping non-text message");
                continue;
            }
        };
        let sender = match event.source {
            LineSource::User { user_id } => Sender::User(user_id),
            LineSource::Group { .. } | LineSource::Room { .. } => Sender::Unknown,
        };

        messages.push(IncomingMessage {
            id: Uuid::new_v4(),
            channel: "line".to_string(),
            sender,
            text,
            timestamp: DateTime::<Utc>::from_timestamp_millis(event.timestamp)
                .unwrap_or_else(Utc::now),
            reply_token: event.reply_token,
        });
    }

    Ok(messages)
}
