//! Gateway: wires the conversation to the LINE channel.
//!
//! Runs the webhook server and the broadcast loop, and shuts both down on
//! Ctrl-C.

pub mod api;
mod broadcast;

use crate::conversation::Conversation;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use yurei_core::{
    config::{BroadcastConfig, ServerConfig},
    traits::Channel,
};

/// The running bot.
pub struct Gateway {
    conversation: Arc<Conversation>,
    channel: Arc<dyn Channel>,
    channel_secret: String,
    server: ServerConfig,
    broadcast: BroadcastConfig,
}

impl Gateway {
    pub fn new(
        conversation: Arc<Conversation>,
        channel: Arc<dyn Channel>,
        channel_secret: String,
        server: ServerConfig,
        broadcast: BroadcastConfig,
    ) -> Self {
        Self {
            conversation,
            channel,
            channel_secret,
            server,
            broadcast,
        }
    }

    /// Serve webhooks until Ctrl-C.
    pub async fn run(self) -> anyhow::Result<()> {
        info!(
            "Yurei gateway running | channel: {} | broadcast: {}",
            self.channel.name(),
            if self.broadcast.enabled {
                format!(
                    "every {}h to {}",
                    self.broadcast.interval_hours, self.broadcast.recipient
                )
            } else {
                "off".to_string()
            }
        );

        let bc_handle = if self.broadcast.enabled {
            let bc_conversation = self.conversation.clone();
            let bc_channel = self.channel.clone();
            let period = broadcast::broadcast_period(self.broadcast.interval_hours);
            let recipient = self.broadcast.recipient.clone();
            Some(tokio::spawn(async move {
                Self::broadcast_loop(bc_conversation, bc_channel, period, recipient).await;
            }))
        } else {
            None
        };

        let state = api::ApiState {
            conversation: self.conversation.clone(),
            channel: self.channel.clone(),
            channel_secret: Arc::from(self.channel_secret.as_str()),
            uptime: Instant::now(),
        };

        let shutdown = async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received shutdown signal");
            }
        };
        let result = api::serve(&self.server, state, shutdown).await;

        if let Some(h) = bc_handle {
            h.abort();
        }
        info!("Shutdown complete.");
        result
    }
}
