//! Periodic push of a freshly generated ghost story.

use super::Gateway;
use crate::conversation::Conversation;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use yurei_core::{message::OutgoingMessage, traits::Channel};

const SECS_PER_HOUR: u64 = 60 * 60;

/// Interval between broadcasts. Zero is clamped to one hour.
pub(crate) fn broadcast_period(interval_hours: u64) -> Duration {
    if interval_hours == 0 {
        warn!("broadcast: interval_hours = 0 is invalid, using 1");
        return Duration::from_secs(SECS_PER_HOUR);
    }
    Duration::from_secs(interval_hours.saturating_mul(SECS_PER_HOUR))
}

/// Generate one broadcast and push it to `recipient`.
///
/// Returns `true` when a message was delivered.
pub(crate) async fn run_broadcast(
    conversation: &Conversation,
    channel: &dyn Channel,
    recipient: &str,
) -> bool {
    if recipient.trim().is_empty() {
        warn!("broadcast: no recipient configured, skipping");
        return false;
    }

    let text = match conversation.broadcast().await {
        Ok(text) => text,
        Err(e) => {
            error!("broadcast: generation failed: {e}");
            return false;
        }
    };

    match channel
        .send(OutgoingMessage::push(recipient, vec![text]))
        .await
    {
        Ok(()) => {
            info!("broadcast: delivered to {recipient}");
            true
        }
        Err(e) => {
            error!("broadcast: push to {recipient} failed: {e}");
            false
        }
    }
}

impl Gateway {
    /// Background task: one broadcast per period, the first one full period
    /// after startup. Failures are logged and the loop keeps going.
    pub(super) async fn broadcast_loop(
        conversation: Arc<Conversation>,
        channel: Arc<dyn Channel>,
        period: Duration,
        recipient: String,
    ) {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            info!("broadcast: tick");
            run_broadcast(&conversation, channel.as_ref(), &recipient).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use yurei_core::{
        completion::{Completion, CompletionRequest},
        error::YureiError,
        message::{DeliveryTarget, MessageEntry},
        persona::{BROADCAST_PROMPT, PROTECTIVE_PROMPT},
        traits::Provider,
    };

    struct StoryProvider {
        fail: bool,
    }

    #[async_trait]
    impl Provider for StoryProvider {
        fn name(&self) -> &str {
            "story"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<Completion, YureiError> {
            if self.fail {
                return Err(YureiError::GenerationFailure("timeout".into()));
            }
            Ok(Completion {
                text: "夜の校舎に足音が響いた".into(),
                ..Default::default()
            })
        }
    }

    #[derive(Default)]
    struct RecordingChannel {
        sent: Mutex<Vec<OutgoingMessage>>,
        fail: bool,
    }

    #[async_trait]
    impl Channel for RecordingChannel {
        fn name(&self) -> &str {
            "recording"
        }

        async fn send(&self, message: OutgoingMessage) -> Result<(), YureiError> {
            if self.fail {
                return Err(YureiError::Channel("push rejected".into()));
            }
            self.sent.lock().unwrap().push(message);
            Ok(())
        }

        async fn display_name(&self, user_id: &str) -> Result<String, YureiError> {
            Ok(user_id.to_string())
        }
    }

    fn conversation(fail: bool) -> Conversation {
        Conversation::new(Arc::new(StoryProvider { fail }))
    }

    #[test]
    fn test_broadcast_period() {
        assert_eq!(broadcast_period(10), Duration::from_secs(36_000));
        assert_eq!(broadcast_period(0), Duration::from_secs(3_600));
    }

    #[tokio::test]
    async fn test_run_broadcast_pushes_story() {
        let conv = conversation(false);
        conv.install_protective_persona().await;
        let channel = RecordingChannel::default();

        assert!(run_broadcast(&conv, &channel, "Uabc").await);

        let sent = channel.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].target, DeliveryTarget::Push("Uabc".into()));
        assert_eq!(sent[0].texts, vec!["夜の校舎に足音が響いた".to_string()]);

        // Transcript holds only the broadcast prompt afterwards.
        assert_eq!(
            conv.snapshot().await,
            vec![MessageEntry::user(BROADCAST_PROMPT)]
        );
    }

    #[tokio::test]
    async fn test_run_broadcast_skips_empty_recipient() {
        let conv = conversation(false);
        conv.install_protective_persona().await;
        let channel = RecordingChannel::default();

        assert!(!run_broadcast(&conv, &channel, "  ").await);
        assert!(channel.sent.lock().unwrap().is_empty());
        assert_eq!(
            conv.snapshot().await,
            vec![MessageEntry::system(PROTECTIVE_PROMPT)]
        );
    }

    #[tokio::test]
    async fn test_run_broadcast_generation_failure() {
        let conv = conversation(true);
        let channel = RecordingChannel::default();
        assert!(!run_broadcast(&conv, &channel, "Uabc").await);
        assert!(channel.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_broadcast_push_failure() {
        let conv = conversation(false);
        let channel = RecordingChannel {
            fail: true,
            ..Default::default()
        };
        assert!(!run_broadcast(&conv, &channel, "Uabc").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_waits_one_full_period() {
        let conv = Arc::new(conversation(false));
        let channel = Arc::new(RecordingChannel::default());
        let period = Duration::from_secs(3_600);

        let handle = tokio::spawn(Gateway::broadcast_loop(
            conv.clone(),
            channel.clone(),
            period,
            "Uabc".into(),
        ));

        tokio::time::sleep(period - Duration::from_secs(1)).await;
        assert!(channel.sent.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(channel.sent.lock().unwrap().len(), 1);

        tokio::time::sleep(period).await;
        assert_eq!(channel.sent.lock().unwrap().len(), 2);

        handle.abort();
    }
}
