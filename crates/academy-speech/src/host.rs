//! Host speech service interfaces.
//!
//! The adapters only rely on what these traits expose: capability is
//! expressed by whether a host is present at all, recognition delivers a
//! stream of events, and synthesis offers immediate cancellation plus a
//! completion callback.

use academy_core::config::{SpeechConfig, VoiceConfig};
use tokio::sync::mpsc;

use crate::error::SpeechError;

/// Options passed to the recognizer when a session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionOptions {
    /// BCP 47 language tag.
    pub language: String,
    /// Whether interim (non-final) results should be delivered.
    pub interim_results: bool,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            interim_results: true,
        }
    }
}

impl From<&VoiceConfig> for RecognitionOptions {
    fn from(config: &VoiceConfig) -> Self {
        Self {
            language: config.language.clone(),
            interim_results: config.interim_results,
        }
    }
}

/// One candidate transcription of a result.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub transcript: String,
    pub confidence: f32,
}

/// One recognition result, either interim or final.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionResult {
    /// Candidates, most likely first.
    pub alternatives: Vec<Alternative>,
    pub is_final: bool,
}

impl RecognitionResult {
    /// A result with a single alternative.
    pub fn single(transcript: impl Into<String>, is_final: bool) -> Self {
        Self {
            alternatives: vec![Alternative {
                transcript: transcript.into(),
                confidence: 1.0,
            }],
            is_final,
        }
    }

    /// Transcript of the most likely alternative.
    pub fn best(&self) -> Option<&str> {
        self.alternatives.first().map(|a| a.transcript.as_str())
    }
}

/// Event emitted by a recognizer during a session.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionEvent {
    /// The host began capturing audio.
    Started,
    /// Results changed. `results[result_index..]` are the new or updated ones.
    Result {
        result_index: usize,
        results: Vec<RecognitionResult>,
    },
    /// The host reported an error. The session ends.
    Error(String),
    /// The session ended.
    Ended,
}

/// Stream of events for one recognition session.
pub type RecognitionStream = mpsc::UnboundedReceiver<RecognitionEvent>;

/// A host speech recognition service.
pub trait SpeechRecognizer: Send + Sync {
    /// Begin a session. Events are delivered on the returned stream until
    /// `Ended` is sent or the stream closes.
    fn start(&self, options: &RecognitionOptions) -> Result<RecognitionStream, SpeechError>;

    /// Ask the host to end the active session.
    fn stop(&self);
}

/// Fixed voice parameters applied to every utterance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtteranceParams {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for UtteranceParams {
    fn default() -> Self {
        Self {
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

impl From<&SpeechConfig> for UtteranceParams {
    fn from(config: &SpeechConfig) -> Self {
        Self {
            rate: config.rate,
            pitch: config.pitch,
            volume: config.volume.clamp(0.0, 1.0),
        }
    }
}

/// A single piece of text handed to the synthesizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Monotonic id assigned by the output adapter.
    pub id: u64,
    pub text: String,
    pub params: UtteranceParams,
}

/// Completion callback for an utterance.
pub type UtteranceEnd = Box<dyn FnOnce() + Send + 'static>;

/// A host speech synthesis service.
///
/// The output channel is process-wide: `cancel` silences whatever is
/// playing, regardless of who started it.
pub trait SpeechSynthesizer: Send + Sync {
    /// Start playing `utterance` and call `on_end` when playback finishes.
    /// Hosts may skip `on_end` for cancelled utterances.
    fn speak(&self, utterance: Utterance, on_end: UtteranceEnd);

    /// Immediately cancel any in-flight utterance.
    fn cancel(&self);
}
