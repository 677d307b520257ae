//! Text-only speech hosts for terminals and tests.
//!
//! `TerminalSynthesizer` "plays" an utterance by logging it and completing
//! after the time it would take to read aloud. `LineRecognizer` turns typed
//! lines into the interim/final event sequence a live recognizer produces.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::SpeechError;
use crate::host::{
    RecognitionEvent, RecognitionOptions, RecognitionResult, RecognitionStream, SpeechRecognizer,
    SpeechSynthesizer, Utterance, UtteranceEnd,
};

// =============================================================================
// TerminalSynthesizer
// =============================================================================

/// Synthesizer that paces utterances on a timer instead of producing audio.
pub struct TerminalSynthesizer {
    words_per_minute: u32,
    playing: Mutex<Option<JoinHandle<()>>>,
}

impl TerminalSynthesizer {
    pub fn new(words_per_minute: u32) -> Self {
        Self {
            words_per_minute: words_per_minute.max(1),
            playing: Mutex::new(None),
        }
    }

    fn playing(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.playing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// How long `text` takes to speak at `rate`.
    pub fn duration_for(&self, text: &str, rate: f32) -> Duration {
        let words = text.split_whitespace().count() as f64;
        let rate = f64::from(rate).max(0.1);
        Duration::from_secs_f64(words * 60.0 / (f64::from(self.words_per_minute) * rate))
    }
}

impl SpeechSynthesizer for TerminalSynthesizer {
    fn speak(&self, utterance: Utterance, on_end: UtteranceEnd) {
        let duration = self.duration_for(&utterance.text, utterance.params.rate);
        tracing::info!(
            utterance = utterance.id,
            words = utterance.text.split_whitespace().count(),
            duration_ms = duration.as_millis() as u64,
            "Speaking response"
        );

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No async runtime, completing utterance immediately");
                on_end();
                return;
            }
        };

        let task = handle.spawn(async move {
            tokio::time::sleep(duration).await;
            on_end();
        });
        if let Some(previous) = self.playing().replace(task) {
            previous.abort();
        }
    }

    fn cancel(&self) {
        if let Some(task) = self.playing().take() {
            task.abort();
        }
    }
}

// =============================================================================
// LineRecognizer
// =============================================================================

/// Deliver one event. A closed receiver means the caller dropped the
/// session stream; the event is discarded.
fn emit(tx: &mpsc::UnboundedSender<RecognitionEvent>, event: RecognitionEvent) -> bool {
    match tx.send(event) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(event = ?e.0, "Recognition stream abandoned, event dropped");
            false
        }
    }
}

/// Recognizer fed with whole lines of text.
///
/// Each [`LineRecognizer::feed`] call plays out one utterance on the active
/// session: growing interim prefixes (when requested), one final result, then
/// the end of the session.
#[derive(Default)]
pub struct LineRecognizer {
    active: Mutex<Option<(mpsc::UnboundedSender<RecognitionEvent>, RecognitionOptions)>>,
}

impl LineRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn active(
        &self,
    ) -> MutexGuard<'_, Option<(mpsc::UnboundedSender<RecognitionEvent>, RecognitionOptions)>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver `line` to the active session and end it.
    ///
    /// Returns `false` if no session is open.
    pub fn feed(&self, line: &str) -> bool {
        let Some((tx, options)) = self.active().take() else {
            return false;
        };

        let words: Vec<&str> = line.split_whitespace().collect();
        if options.interim_results {
            for n in 1..words.len() {
                emit(&tx, RecognitionEvent::Result {
                    result_index: 0,
                    results: vec![RecognitionResult::single(words[..n].join(" "), false)],
                });
            }
        }
        if !words.is_empty() {
            emit(&tx, RecognitionEvent::Result {
                result_index: 0,
                results: vec![RecognitionResult::single(words.join(" "), true)],
            });
        }
        emit(&tx, RecognitionEvent::Ended);
        true
    }
}

impl SpeechRecognizer for LineRecognizer {
    fn start(&self, options: &RecognitionOptions) -> Result<RecognitionStream, SpeechError> {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(RecognitionEvent::Started)
            .map_err(|e| SpeechError::Host(e.to_string()))?;
        *self.active() = Some((tx, options.clone()));
        Ok(rx)
    }

    fn stop(&self) {
        if let Some((tx, _)) = self.active().take() {
            emit(&tx, RecognitionEvent::Ended);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
