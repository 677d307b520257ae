//! Speech input adapter.
//!
//! `SpeechInput` owns at most one recognition session. It validates the
//! Idle -> Listening -> Idle lifecycle, folds recognition events into the
//! session transcript, and hands finalized fragments back to the caller so
//! each one can be dispatched individually.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::SpeechError;
use crate::host::{RecognitionEvent, RecognitionOptions, RecognitionStream, SpeechRecognizer};
use crate::state::{InputState, StateMachine};

/// Transcript data for one recognition session.
#[derive(Debug, Clone)]
pub struct RecognitionSession {
    /// Unique identifier for this session.
    pub id: Uuid,
    /// When the session was started.
    pub started_at: DateTime<Utc>,
    /// Finalized fragments in arrival order.
    pub finals: Vec<String>,
    /// The latest interim text. Replaced on every result event.
    pub interim: Option<String>,
}

impl RecognitionSession {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            finals: Vec::new(),
            interim: None,
        }
    }

    /// The cumulative transcript: finalized fragments joined by spaces.
    pub fn transcript(&self) -> String {
        self.finals.join(" ")
    }
}

/// Capability-checked recognition adapter.
pub struct SpeechInput {
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    options: RecognitionOptions,
    state: StateMachine<InputState>,
    session: Mutex<Option<RecognitionSession>>,
}

impl std::fmt::Debug for SpeechInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechInput")
            .field("supported", &self.recognizer.is_some())
            .field("options", &self.options)
            .field("state", &self.state)
            .finish()
    }
}

impl SpeechInput {
    /// Create an adapter. `None` means the host has no recognition capability.
    pub fn new(recognizer: Option<Arc<dyn SpeechRecognizer>>, options: RecognitionOptions) -> Self {
        Self {
            recognizer,
            options,
            state: StateMachine::new(),
            session: Mutex::new(None),
        }
    }

    /// Whether the host offers speech recognition.
    pub fn is_supported(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Returns the current adapter state.
    pub fn state(&self) -> InputState {
        self.state.current()
    }

    fn session(&self) -> MutexGuard<'_, Option<RecognitionSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a recognition session.
    ///
    /// Transitions Idle -> Listening and returns the session's event stream.
    /// Fails without changing state if recognition is unsupported or a
    /// session is already active.
    pub fn start(&self) -> Result<RecognitionStream, SpeechError> {
        let Some(recognizer) = self.recognizer.as_ref() else {
            tracing::warn!("Speech recognition not supported on this host");
            return Err(SpeechError::Unsupported);
        };

        // The transition itself is the check: a concurrent start that wins
        // the race leaves this caller with an invalid Listening -> Listening.
        if let Err(e) = self.state.transition(InputState::Listening) {
            tracing::debug!(error = %e, "Recognition session already active");
            return Err(SpeechError::AlreadyListening);
        }

        match recognizer.start(&self.options) {
            Ok(stream) => {
                let session = RecognitionSession::new();
                tracing::info!(
                    session_id = %session.id,
                    language = %self.options.language,
                    "Recognition session started"
                );
                *self.session() = Some(session);
                Ok(stream)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Recognizer failed to start");
                *self.session() = None;
                self.state.reset();
                Err(e)
            }
        }
    }

    /// Stop the active session. The adapter returns to Idle immediately.
    pub fn stop(&self) -> Result<(), SpeechError> {
        if self.state.current() != InputState::Listening {
            return Err(SpeechError::NotListening);
        }
        if let Some(recognizer) = self.recognizer.as_ref() {
            recognizer.stop();
        }
        self.finish("stopped");
        Ok(())
    }

    /// Fold one recognition event into the session.
    ///
    /// Returns the fragments finalized by this event, in order. Interim text
    /// is kept for display only and never returned. Events that arrive while
    /// Idle are ignored.
    pub fn handle_event(&self, event: RecognitionEvent) -> Vec<String> {
        if self.state.current() != InputState::Listening {
            tracing::debug!(?event, "Recognition event ignored while idle");
            return Vec::new();
        }

        match event {
            RecognitionEvent::Started => {
                tracing::debug!("Recognizer reported start");
                Vec::new()
            }
            RecognitionEvent::Result {
                result_index,
                results,
            } => {
                let mut finals = Vec::new();
                let mut interim = String::new();
                for result in results.iter().skip(result_index) {
                    let Some(text) = result.best() else { continue };
                    if result.is_final {
                        finals.push(text.to_string());
                    } else {
                        interim.push_str(text);
                    }
                }

                let mut guard = self.session();
                if let Some(session) = guard.as_mut() {
                    session.finals.extend(finals.iter().cloned());
                    session.interim = (!interim.is_empty()).then_some(interim);
                }
                finals
            }
            RecognitionEvent::Error(message) => {
                tracing::warn!(error = %message, "Recognition error, ending session");
                self.finish("error");
                Vec::new()
            }
            RecognitionEvent::Ended => {
                self.finish("ended");
                Vec::new()
            }
        }
    }

    fn finish(&self, reason: &str) {
        if let Err(e) = self.state.transition(InputState::Idle) {
            tracing::debug!(error = %e, "Recognition already idle");
            return;
        }
        let mut guard = self.session();
        if let Some(session) = guard.as_mut() {
            session.interim = None;
            tracing::info!(
                session_id = %session.id,
                fragments = session.finals.len(),
                reason,
                "Recognition session ended"
            );
        }
    }

    /// Cumulative transcript of the current or most recent session.
    pub fn transcript(&self) -> String {
        self.session()
            .as_ref()
            .map(RecognitionSession::transcript)
            .unwrap_or_default()
    }

    /// Interim text of the active session, if any.
    pub fn interim(&self) -> Option<String> {
        self.session().as_ref().and_then(|s| s.interim.clone())
    }

    /// Returns a clone of the current or most recent session.
    pub fn current_session(&self) -> Option<RecognitionSession> {
        self.session().clone()
    }
}

// =============================================================================
// Tests
// =============================================================================
