//! LINE Messaging API channel.
//!
//! Inbound events arrive on the webhook server; this module verifies and
//! parses them, and answers through `reply` / `push`.
//! Docs: <https://developers.line.biz/en/reference/messaging-api/>

mod send;
pub mod signature;
pub mod types;
mod webhook;


pub use signature::{sign, verify_signature};
pub use webhook::parse_webhook;

use async_trait::async_trait;
use yurei_core::{
    config::LineConfig,
    error::YureiError,
    message::{DeliveryTarget, OutgoingMessage},
    traits::Channel,
};

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// LINE channel using the Messaging API.
pub struct LineChannel {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl LineChannel {
    /// Create a new LINE channel from config.
    pub fn new(config: &LineConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base.trim_end_matches('/').to_string(),
            access_token: config.channel_access_token.clone(),
        }
    }
}

#[async_trait]
impl Channel for LineChannel {
    fn name(&self) -> &str {
        "line"
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), YureiError> {
        match message.target {
            DeliveryTarget::Reply(token) => self.reply_message(&token, &message.texts).await,
            DeliveryTarget::Push(to) => self.push_message(&to, &message.texts).await,
        }
    }

    async fn display_name(&self, user_id: &str) -> Result<String, YureiError> {
        self.get_profile(user_id).await
    }
}
