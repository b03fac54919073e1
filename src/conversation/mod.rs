//! The single process-wide conversation: transcript, persona state, and the
//! dispatcher that drives them.
//!
//! Every operation takes the same async lock for its whole duration,
//! including the completion call, so turns and broadcasts never interleave.

mod keywords;


use keywords::match_trigger;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use yurei_core::{
    completion::{CompletionRequest, GenerationParams},
    error::YureiError,
    message::MessageEntry,
    persona::{Persona, BROADCAST_PROMPT},
    traits::Provider,
    transcript::Transcript,
};

/// Which persona prelude currently heads the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaState {
    /// No message has been dispatched yet.
    Uninitialized,
    ProtectiveActive,
    HostileActive,
}

impl From<Persona> for PersonaState {
    fn from(persona: Persona) -> Self {
        match persona {
            Persona::Protective => Self::ProtectiveActive,
            Persona::Hostile => Self::HostileActive,
        }
    }
}

struct State {
    transcript: Transcript,
    persona: PersonaState,
}

impl State {
    fn install(&mut self, persona: Persona) {
        self.transcript.clear();
        self.transcript.append(MessageEntry::system(persona.prompt()));
        self.persona = persona.into();
    }
}

/// Owner of the one transcript the bot keeps.
pub struct Conversation {
    provider: Arc<dyn Provider>,
    state: Mutex<State>,
}

impl Conversation {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            state: Mutex::new(State {
                transcript: Transcript::new(),
                persona: PersonaState::Uninitialized,
            }),
        }
    }

    /// Replace the transcript with the protective prelude.
    pub async fn install_protective_persona(&self) {
        self.state.lock().await.install(Persona::Protective);
    }

    /// Replace the transcript with the hostile prelude.
    pub async fn install_hostile_persona(&self) {
        self.state.lock().await.install(Persona::Hostile);
    }

    /// Route one user message and return the single reply text.
    ///
    /// Reset keywords win over hostile keywords; anything else is sent to
    /// the model.
    pub async fn dispatch(&self, sender: &str, text: &str) -> Result<String, YureiError> {
        let mut state = self.state.lock().await;

        if state.persona == PersonaState::Uninitialized {
            info!("conversation: first message, installing protective persona");
            state.install(Persona::Protective);
        }

        if let Some(trigger) = match_trigger(text) {
            info!(
                "conversation: keyword from {sender} → {} persona",
                trigger.persona.display_name()
            );
            state.install(trigger.persona);
            return Ok(trigger.reply.to_string());
        }

        self.generate_locked(&mut state, sender, text).await
    }

    /// Append `text`, ask the model, append and return its reply.
    ///
    /// On failure the user entry stays without an assistant entry.
    pub async fn generate(&self, sender: &str, text: &str) -> Result<String, YureiError> {
        let mut state = self.state.lock().await;
        self.generate_locked(&mut state, sender, text).await
    }

    async fn generate_locked(
        &self,
        state: &mut State,
        sender: &str,
        text: &str,
    ) -> Result<String, YureiError> {
        if !state.transcript.starts_with_system() {
            debug!("conversation: appending to a transcript without a persona prelude");
        }
        state.transcript.append(MessageEntry::user(text));

        let request = CompletionRequest {
            messages: state.transcript.snapshot(),
            params: GenerationParams::conversation(),
        };
        let completion = match self.provider.complete(&request).await {
            Ok(c) => c,
            Err(e) => {
                warn!("conversation: generation for {sender} failed: {e}");
                return Err(e);
            }
        };

        info!(
            "conversation: reply for {sender} from {} in {}ms ({} entries)",
            self.provider.name(),
            completion.processing_time_ms,
            state.transcript.len() + 1
        );
        state
            .transcript
            .append(MessageEntry::assistant(completion.text.clone()));
        Ok(completion.text)
    }

    /// Reset the transcript to the one-shot broadcast prompt and generate
    /// the text to push. The reply is not appended and the persona state is
    /// left as it was.
    pub async fn broadcast(&self) -> Result<String, YureiError> {
        let mut state = self.state.lock().await;
        state.transcript.clear();
        state.transcript.append(MessageEntry::user(BROADCAST_PROMPT));

        let request = CompletionRequest {
            messages: state.transcript.snapshot(),
            params: GenerationParams::broadcast(),
        };
        let completion = self.provider.complete(&request).await?;
        Ok(completion.text)
    }

    /// Copy of the current transcript.
    pub async fn snapshot(&self) -> Vec<MessageEntry> {
        self.state.lock().await.transcript.snapshot()
    }

    pub async fn persona_state(&self) -> PersonaState {
        self.state.lock().await.persona
    }
}
