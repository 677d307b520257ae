//! Academy Speech crate - speech recognition and synthesis adapters.
//!
//! Wraps host speech services behind capability-checked adapters:
//! - [`SpeechInput`] streams one recognition session at a time
//!   (Idle -> Listening -> Idle) and yields finalized transcript fragments.
//! - [`SpeechOutput`] plays one utterance at a time (Idle -> Speaking -> Idle),
//!   pre-empting any in-flight utterance on every `speak`.
//!
//! Hosts plug in through the [`SpeechRecognizer`] and [`SpeechSynthesizer`]
//! traits. The [`terminal`] module provides text-only hosts.

pub mod error;
pub mod host;
pub mod input;
pub mod output;
pub mod state;
pub mod terminal;

pub use error::SpeechError;
pub use host::{
    Alternative, RecognitionEvent, RecognitionOptions, RecognitionResult, RecognitionStream,
    SpeechRecognizer, SpeechSynthesizer, Utterance, UtteranceEnd, UtteranceParams,
};
pub use input::{RecognitionSession, SpeechInput};
pub use output::SpeechOutput;
pub use state::{InputState, OutputState, StateMachine};
pub use terminal::{LineRecognizer, TerminalSynthesizer};
