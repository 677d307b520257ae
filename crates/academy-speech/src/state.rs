//! Speech adapter state machines with thread-safe transitions.
//!
//! Recognition:
//! - Idle -> Listening (session started)
//! - Listening -> Idle (stream ended, stopped, or host error)
//!
//! Synthesis:
//! - Idle -> Speaking (utterance started)
//! - Speaking -> Speaking (utterance pre-empted by a newer one)
//! - Speaking -> Idle (utterance completed or stopped)

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::SpeechError;

/// A state enum with an explicit transition table.
pub trait Transitions: Copy + Eq + fmt::Display + Send + 'static {
    /// The state a fresh machine starts in.
    const INITIAL: Self;

    /// Returns whether a transition from `self` to `target` is valid.
    fn can_transition_to(&self, target: &Self) -> bool;
}

/// State of a speech input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputState {
    /// No recognition session. Ready to start.
    Idle,
    /// A recognition session is streaming results.
    Listening,
}

impl fmt::Display for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputState::Idle => write!(f, "Idle"),
            InputState::Listening => write!(f, "Listening"),
        }
    }
}

impl Transitions for InputState {
    const INITIAL: Self = InputState::Idle;

    fn can_transition_to(&self, target: &InputState) -> bool {
        matches!(
            (self, target),
            (InputState::Idle, InputState::Listening) | (InputState::Listening, InputState::Idle)
        )
    }
}

/// State of a speech output adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputState {
    /// Nothing is playing.
    Idle,
    /// An utterance is playing.
    Speaking,
}

impl fmt::Display for OutputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputState::Idle => write!(f, "Idle"),
            OutputState::Speaking => write!(f, "Speaking"),
        }
    }
}

impl Transitions for OutputState {
    const INITIAL: Self = OutputState::Idle;

    fn can_transition_to(&self, target: &OutputState) -> bool {
        matches!(
            (self, target),
            (OutputState::Idle, OutputState::Speaking)
                | (OutputState::Speaking, OutputState::Speaking)
                | (OutputState::Speaking, OutputState::Idle)
        )
    }
}

/// Thread-safe state machine.
///
/// Clones share the same underlying state. Every transition is validated
/// against the state's transition table before it is applied.
#[derive(Debug, Clone)]
pub struct StateMachine<S: Transitions> {
    state: Arc<Mutex<S>>,
}

impl<S: Transitions> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Transitions> StateMachine<S> {
    /// Create a new state machine in the initial state.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(S::INITIAL)),
        }
    }

    // The state is a plain Copy value, so a poisoned lock still holds a
    // usable value.
    fn lock(&self) -> MutexGuard<'_, S> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current state.
    pub fn current(&self) -> S {
        *self.lock()
    }

    /// Attempt to transition to the target state.
    pub fn transition(&self, target: S) -> Result<(), SpeechError> {
        let mut state = self.lock();
        if state.can_transition_to(&target) {
            tracing::debug!("Speech state: {} -> {}", *state, target);
            *state = target;
            Ok(())
        } else {
            Err(SpeechError::InvalidTransition {
                from: state.to_string(),
                to: target.to_string(),
            })
        }
    }

    /// Force the machine back to its initial state (used for error recovery).
    pub fn reset(&self) {
        let mut state = self.lock();
        if *state != S::INITIAL {
            tracing::debug!("Speech state reset to {} from {}", S::INITIAL, *state);
        }
        *state = S::INITIAL;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(InputState::Idle.to_string(), "Idle");
        assert_eq!(InputState::Listening.to_string(), "Listening");
        assert_eq!(OutputState::Idle.to_string(), "Idle");
        assert_eq!(OutputState::Speaking.to_string(), "Speaking");
    }

    #[test]
    fn test_input_transitions() {
        assert!(InputState::Idle.can_transition_to(&InputState::Listening));
        assert!(InputState::Listening.can_transition_to(&InputState::Idle));

        assert!(!InputState::Idle.can_transition_to(&InputState::Idle));
        assert!(!InputState::Listening.can_transition_to(&InputState::Listening));
    }

    #[test]
    fn test_output_transitions() {
        assert!(OutputState::Idle.can_transition_to(&OutputState::Speaking));
        assert!(OutputState::Speaking.can_transition_to(&OutputState::Speaking));
        assert!(OutputState::Speaking.can_transition_to(&OutputState::Idle));

        assert!(!OutputState::Idle.can_transition_to(&OutputState::Idle));
    }

    #[test]
    fn test_state_machine_round_trip() {
        let sm: StateMachine<InputState> = StateMachine::new();
        assert_eq!(sm.current(), InputState::Idle);

        sm.transition(InputState::Listening).unwrap();
        assert_eq!(sm.current(), InputState::Listening);

        sm.transition(InputState::Idle).unwrap();
        assert_eq!(sm.current(), InputState::Idle);
    }

    #[test]
    fn test_state_machine_rejects_reentry() {
        let sm: StateMachine<InputState> = StateMachine::new();
        sm.transition(InputState::Listening).unwrap();

        let result = sm.transition(InputState::Listening);
        match result {
            Err(SpeechError::InvalidTransition { from, to }) => {
                assert_eq!(from, "Listening");
                assert_eq!(to, "Listening");
            }
            other => panic!("Expected InvalidTransition, got {:?}", other),
        }
        assert_eq!(sm.current(), InputState::Listening);
    }

    #[test]
    fn test_state_machine_reset() {
        let sm: StateMachine<OutputState> = StateMachine::new();
        sm.transition(OutputState::Speaking).unwrap();
        sm.reset();
        assert_eq!(sm.current(), OutputState::Idle);
    }

    #[test]
    fn test_state_machine_clone_is_shared() {
        let sm1: StateMachine<InputState> = StateMachine::new();
        let sm2 = sm1.clone();

        sm1.transition(InputState::Listening).unwrap();
        assert_eq!(sm2.current(), InputState::Listening);
    }
}
