use crate::{
    completion::{Completion, CompletionRequest},
    error::YureiError,
    message::OutgoingMessage,
};
use async_trait::async_trait;

/// Completion API trait: the brain.
///
/// Implementations return the first candidate or fail with
/// [`YureiError::GenerationFailure`].
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Send the conversation to the model and get the first candidate back.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, YureiError>;
}

/// Messaging channel trait: the mouth.
///
/// Inbound events arrive through the webhook server, so a channel only
/// delivers messages and looks up profiles.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Deliver a message by reply token or push recipient.
    async fn send(&self, message: OutgoingMessage) -> Result<(), YureiError>;

    /// Resolve a user id to a display name.
    async fn display_name(&self, user_id: &str) -> Result<String, YureiError>;
}
