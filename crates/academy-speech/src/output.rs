//! Speech output adapter.
//!
//! One `SpeechOutput` is created per process and shared by every surface
//! that speaks. The last caller of [`SpeechOutput::speak`] owns the channel:
//! each call cancels whatever is playing and starts a new utterance. There
//! is no queue.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::host::{SpeechSynthesizer, Utterance, UtteranceParams};
use crate::state::{OutputState, StateMachine};

struct Playback {
    state: StateMachine<OutputState>,
    /// Id of the utterance that currently owns the Speaking state.
    current: Mutex<Option<u64>>,
    speaking_tx: watch::Sender<bool>,
}

impl Playback {
    fn current(&self) -> MutexGuard<'_, Option<u64>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, id: u64) {
        let mut current = self.current();
        if let Err(e) = self.state.transition(OutputState::Speaking) {
            tracing::debug!(error = %e, "Unexpected output transition");
        }
        *current = Some(id);
        self.speaking_tx.send_replace(true);
    }

    /// Completion callback. Only the utterance that owns the state may end it.
    fn complete(&self, id: u64) {
        let mut current = self.current();
        if *current != Some(id) {
            tracing::debug!(utterance = id, "Ignoring completion of pre-empted utterance");
            return;
        }
        *current = None;
        self.state.reset();
        self.speaking_tx.send_replace(false);
        tracing::debug!(utterance = id, "Utterance finished");
    }

    fn halt(&self) -> bool {
        let mut current = self.current();
        let was_speaking = current.take().is_some();
        self.state.reset();
        self.speaking_tx.send_replace(false);
        was_speaking
    }
}

/// Capability-checked, pre-emptive speech output.
pub struct SpeechOutput {
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    params: UtteranceParams,
    next_id: AtomicU64,
    // Serializes cancel + speak pairs against the host.
    host: Mutex<()>,
    playback: Arc<Playback>,
}

impl std::fmt::Debug for SpeechOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechOutput")
            .field("supported", &self.synthesizer.is_some())
            .field("params", &self.params)
            .field("state", &self.state())
            .finish()
    }
}

impl SpeechOutput {
    /// Create an adapter. `None` means the host has no synthesis capability
    /// and every `speak` becomes a silent no-op.
    pub fn new(synthesizer: Option<Arc<dyn SpeechSynthesizer>>, params: UtteranceParams) -> Self {
        let (speaking_tx, _) = watch::channel(false);
        Self {
            synthesizer,
            params,
            next_id: AtomicU64::new(1),
            host: Mutex::new(()),
            playback: Arc::new(Playback {
                state: StateMachine::new(),
                current: Mutex::new(None),
                speaking_tx,
            }),
        }
    }

    /// Whether the host offers speech synthesis.
    pub fn is_supported(&self) -> bool {
        self.synthesizer.is_some()
    }

    /// Returns the current playback state.
    pub fn state(&self) -> OutputState {
        self.playback.state.current()
    }

    /// Whether an utterance is currently playing.
    pub fn is_speaking(&self) -> bool {
        self.state() == OutputState::Speaking
    }

    /// Id of the utterance that currently owns the output, if any.
    pub fn current_utterance(&self) -> Option<u64> {
        *self.playback.current()
    }

    /// Observe the speaking indicator.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.playback.speaking_tx.subscribe()
    }

    /// Speak `text`, cancelling anything already playing.
    ///
    /// Returns the new utterance id, or `None` when synthesis is unsupported.
    pub fn speak(&self, text: &str) -> Option<u64> {
        let Some(synthesizer) = self.synthesizer.as_ref() else {
            tracing::debug!("No speech synthesizer, response stays text-only");
            return None;
        };

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let _host = self.host.lock().unwrap_or_else(PoisonError::into_inner);

        synthesizer.cancel();
        self.playback.begin(id);
        tracing::debug!(utterance = id, chars = text.len(), "Speaking");

        let playback = Arc::clone(&self.playback);
        synthesizer.speak(
            Utterance {
                id,
                text: text.to_string(),
                params: self.params,
            },
            Box::new(move || playback.complete(id)),
        );
        Some(id)
    }

    /// Cancel playback immediately.
    ///
    /// Returns whether an utterance was playing.
    pub fn stop(&self) -> bool {
        let Some(synthesizer) = self.synthesizer.as_ref() else {
            return false;
        };
        let _host = self.host.lock().unwrap_or_else(PoisonError::into_inner);
        synthesizer.cancel();
        let stopped = self.playback.halt();
        if stopped {
            tracing::debug!("Speech stopped");
        }
        stopped
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::UtteranceEnd;

    /// Records utterances and holds their completion callbacks so tests can
    /// fire them in any order.
    #[derive(Default)]
    struct ManualSynthesizer {
        spoken: Mutex<Vec<Utterance>>,
        pending: Mutex<Vec<(u64, UtteranceEnd)>>,
        cancels: AtomicU64,
    }

    impl ManualSynthesizer {
        fn finish(&self, id: u64) {
            let callback = {
                let mut pending = self.pending.lock().unwrap();
                let pos = pending.iter().position(|(pid, _)| *pid == id).unwrap();
                pending.remove(pos).1
            };
            callback();
        }
    }

    impl SpeechSynthesizer for ManualSynthesizer {
        fn speak(&self, utterance: Utterance, on_end: UtteranceEnd) {
            self.pending.lock().unwrap().push((utterance.id, on_end));
            self.spoken.lock().unwrap().push(utterance);
        }

        fn cancel(&self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Completes every utterance synchronously inside `speak`.
    struct InstantSynthesizer;

    impl SpeechSynthesizer for InstantSynthesizer {
        fn speak(&self, _utterance: Utterance, on_end: UtteranceEnd) {
            on_end();
        }

        fn cancel(&self) {}
    }

    fn output() -> (SpeechOutput, Arc<ManualSynthesizer>) {
        let synth = Arc::new(ManualSynthesizer::default());
        let output = SpeechOutput::new(Some(synth.clone()), UtteranceParams::default());
        (output, synth)
    }

    #[test]
    fn test_unsupported_speak_is_silent_noop() {
        let output = SpeechOutput::new(None, UtteranceParams::default());
        assert!(!output.is_supported());
        assert_eq!(output.speak("hello"), None);
        assert_eq!(output.state(), OutputState::Idle);
        assert!(!output.stop());
    }

    #[test]
    fn test_speak_transitions_to_speaking_with_fixed_params() {
        let (output, synth) = output();
        let id = output.speak("hello").unwrap();
        assert!(output.is_speaking());
        assert_eq!(output.current_utterance(), Some(id));

        let spoken = synth.spoken.lock().unwrap();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].text, "hello");
        assert_eq!(spoken[0].params, UtteranceParams::default());
    }

    #[test]
    fn test_speak_always_cancels_first() {
        let (output, synth) = output();
        output.speak("one");
        assert_eq!(synth.cancels.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_completion_returns_to_idle() {
        let (output, synth) = output();
        let id = output.speak("hello").unwrap();
        synth.finish(id);
        assert_eq!(output.state(), OutputState::Idle);
        assert_eq!(output.current_utterance(), None);
    }

    #[test]
    fn test_second_speak_preempts_first() {
        let (output, synth) = output();
        let first = output.speak("first").unwrap();
        let second = output.speak("second").unwrap();
        assert!(second > first);
        assert_eq!(synth.cancels.load(Ordering::SeqCst), 2);
        assert_eq!(output.current_utterance(), Some(second));

        // The pre-empted utterance completing late must not end the new one.
        synth.finish(first);
        assert!(output.is_speaking());
        assert_eq!(output.current_utterance(), Some(second));

        synth.finish(second);
        assert_eq!(output.state(), OutputState::Idle);
    }

    #[test]
    fn test_stop_cancels_and_goes_idle() {
        let (output, synth) = output();
        let id = output.speak("hello").unwrap();
        assert!(output.stop());
        assert_eq!(output.state(), OutputState::Idle);

        // Late completion from the stopped utterance is ignored.
        synth.finish(id);
        assert_eq!(output.state(), OutputState::Idle);
        assert!(!output.stop());
    }

    #[test]
    fn test_synchronous_completion_does_not_deadlock() {
        let output = SpeechOutput::new(Some(Arc::new(InstantSynthesizer)), UtteranceParams::default());
        output.speak("quick");
        assert_eq!(output.state(), OutputState::Idle);
    }

    #[test]
    fn test_subscribe_tracks_speaking_flag() {
        let (output, synth) = output();
        let rx = output.subscribe();
        assert!(!*rx.borrow());

        let id = output.speak("hello").unwrap();
        assert!(*rx.borrow());

        synth.finish(id);
        assert!(!*rx.borrow());
    }
}
