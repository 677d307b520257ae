//! The three chat surfaces.
//!
//! Each surface owns one [`ResponseDispatcher`] and therefore one
//! conversation log. Surfaces that speak share a process-wide
//! [`SpeechOutput`].

use std::sync::Arc;
use std::time::Duration;

use academy_core::config::{AssistantConfig, LabConfig, VoiceConfig};
use academy_speech::{InputState, RecognitionEvent, RecognitionStream, SpeechInput, SpeechOutput};
use tokio::sync::watch;

use crate::dispatcher::{Responder, ResponseDispatcher};
use crate::error::ChatError;
use crate::rulebook::{LabRuleBook, RuleBook};
use crate::types::{Role, Turn};

// =============================================================================
// GeneralAssistant
// =============================================================================

/// Text chat about security topics.
#[derive(Debug)]
pub struct GeneralAssistant {
    dispatcher: ResponseDispatcher,
}

impl GeneralAssistant {
    pub fn new(config: &AssistantConfig) -> Self {
        let book = RuleBook::general();
        let greeting = book.greeting().map(str::to_string);
        Self::with_responder(Arc::new(book), greeting, config)
    }

    /// Build the surface around a custom responder.
    pub fn with_responder(
        responder: Arc<dyn Responder>,
        greeting: Option<String>,
        config: &AssistantConfig,
    ) -> Self {
        let mut dispatcher = ResponseDispatcher::new(
            "assistant",
            responder,
            Duration::from_millis(config.response_delay_ms),
        );
        if let Some(greeting) = greeting {
            dispatcher = dispatcher.with_greeting(greeting);
        }
        Self { dispatcher }
    }

    pub async fn send(&self, input: &str) -> Result<Turn, ChatError> {
        self.dispatcher.send(input).await
    }

    pub fn is_loading(&self) -> bool {
        self.dispatcher.is_loading()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.dispatcher.subscribe_loading()
    }

    pub fn turns(&self) -> Vec<Turn> {
        self.dispatcher.turns()
    }

    pub fn dispatcher(&self) -> &ResponseDispatcher {
        &self.dispatcher
    }
}

// =============================================================================
// LabAssistant
// =============================================================================

/// In-lab helper bound to one vulnerability lab. Reads its answers aloud.
#[derive(Debug)]
pub struct LabAssistant {
    context: String,
    dispatcher: ResponseDispatcher,
    output: Option<Arc<SpeechOutput>>,
    speak_responses: bool,
}

impl LabAssistant {
    pub fn new(
        context: impl Into<String>,
        book: Arc<LabRuleBook>,
        config: &LabConfig,
        output: Option<Arc<SpeechOutput>>,
    ) -> Self {
        let context = context.into();
        if !book.has_context(&context) {
            tracing::info!(context = %context, "Unknown lab, using the global rules");
        }
        let greeting = book.greeting(&context).to_string();
        let dispatcher = ResponseDispatcher::new(
            "lab",
            Arc::new(book.responder(context.clone())),
            Duration::from_millis(config.response_delay_ms),
        )
        .with_greeting(greeting);

        Self {
            context,
            dispatcher,
            output,
            speak_responses: config.speak_responses,
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// Dispatch `input`, then start speaking the answer without waiting for
    /// playback.
    pub async fn send(&self, input: &str) -> Result<Turn, ChatError> {
        let turn = self.dispatcher.send(input).await?;
        if self.speak_responses {
            if let Some(output) = self.output.as_ref() {
                output.speak(&turn.content);
            }
        }
        Ok(turn)
    }

    /// Cut off the answer being read aloud.
    pub fn stop_speaking(&self) -> bool {
        self.output.as_ref().is_some_and(|o| o.stop())
    }

    pub fn is_speaking(&self) -> bool {
        self.output.as_ref().is_some_and(|o| o.is_speaking())
    }

    pub fn is_loading(&self) -> bool {
        self.dispatcher.is_loading()
    }

    pub fn turns(&self) -> Vec<Turn> {
        self.dispatcher.turns()
    }

    pub fn dispatcher(&self) -> &ResponseDispatcher {
        &self.dispatcher
    }
}

// =============================================================================
// VoiceGuide
// =============================================================================

/// Spoken platform guide: listens, answers each finished phrase, and reads
/// the answer aloud.
#[derive(Debug)]
pub struct VoiceGuide {
    input: SpeechInput,
    output: Arc<SpeechOutput>,
    dispatcher: ResponseDispatcher,
}

impl VoiceGuide {
    pub fn new(input: SpeechInput, output: Arc<SpeechOutput>, config: &VoiceConfig) -> Self {
        let book = RuleBook::voice();
        let greeting = book.greeting().map(str::to_string);
        let mut dispatcher = ResponseDispatcher::new(
            "voice",
            Arc::new(book),
            Duration::from_millis(config.response_delay_ms),
        );
        if let Some(greeting) = greeting {
            dispatcher = dispatcher.with_greeting(greeting);
        }
        Self {
            input,
            output,
            dispatcher,
        }
    }

    /// Open a recognition session.
    pub fn start_listening(&self) -> Result<RecognitionStream, ChatError> {
        Ok(self.input.start()?)
    }

    /// Stop the active recognition session.
    pub fn stop_listening(&self) -> Result<(), ChatError> {
        Ok(self.input.stop()?)
    }

    /// Drive a session to completion, answering every final fragment as it
    /// arrives. Returns the assistant turns produced, in order.
    pub async fn process(&self, mut stream: RecognitionStream) -> Vec<Turn> {
        let mut answers = Vec::new();

        while let Some(event) = stream.recv().await {
            for fragment in self.input.handle_event(event) {
                match self.ask(&fragment).await {
                    Ok(turn) => answers.push(turn),
                    Err(e) => tracing::debug!(error = %e, "Fragment not dispatched"),
                }
            }
            if self.input.state() == InputState::Idle {
                break;
            }
        }

        if self.input.state() == InputState::Listening {
            tracing::debug!("Recognition stream closed while listening");
            self.input.handle_event(RecognitionEvent::Ended);
        }
        answers
    }

    /// Start a session and process it until it ends.
    pub async fn listen(&self) -> Result<Vec<Turn>, ChatError> {
        let stream = self.start_listening()?;
        Ok(self.process(stream).await)
    }

    /// Answer `text` and read the answer aloud.
    pub async fn ask(&self, text: &str) -> Result<Turn, ChatError> {
        let turn = self.dispatcher.send(text).await?;
        self.output.speak(&turn.content);
        Ok(turn)
    }

    pub fn stop_speaking(&self) -> bool {
        self.output.stop()
    }

    pub fn is_listening(&self) -> bool {
        self.input.state() == InputState::Listening
    }

    pub fn is_speaking(&self) -> bool {
        self.output.is_speaking()
    }

    /// Transcript of the current or most recent session.
    pub fn transcript(&self) -> String {
        self.input.transcript()
    }

    /// Interim text of the active session.
    pub fn interim(&self) -> Option<String> {
        self.input.interim()
    }

    /// The latest assistant answer, including the greeting.
    pub fn last_response(&self) -> Option<String> {
        self.dispatcher
            .log()
            .last()
            .and_then(|t| (t.role == Role::Assistant).then_some(t.content))
    }

    pub fn turns(&self) -> Vec<Turn> {
        self.dispatcher.turns()
    }

    pub fn dispatcher(&self) -> &ResponseDispatcher {
        &self.dispatcher
    }
}

// =============================================================================
// Tests
// =============================================================================
