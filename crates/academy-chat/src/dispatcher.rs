//! Response dispatcher.
//!
//! Accepts user input for one surface, appends it to the conversation log,
//! waits out the surface's simulated response delay, and appends the
//! responder's answer. At most one response is pending per dispatcher.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::conversation::ConversationLog;
use crate::error::ChatError;
use crate::types::Turn;

/// Text appended in place of a response when the lookup fails.
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// Produces the response text for one user input.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, input: &str) -> Result<String, ChatError>;
}

/// Single-flight dispatcher bound to one surface and one responder.
pub struct ResponseDispatcher {
    surface: &'static str,
    responder: Arc<dyn Responder>,
    delay: Duration,
    log: ConversationLog,
    loading_tx: watch::Sender<bool>,
    in_flight: AtomicBool,
}

impl std::fmt::Debug for ResponseDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseDispatcher")
            .field("surface", &self.surface)
            .field("delay", &self.delay)
            .field("turns", &self.log.len())
            .field("loading", &self.is_loading())
            .finish()
    }
}

/// Clears the pending flags when a dispatch ends, however it ends.
struct Pending<'a> {
    in_flight: &'a AtomicBool,
    loading_tx: &'a watch::Sender<bool>,
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        self.loading_tx.send_replace(false);
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

impl ResponseDispatcher {
    pub fn new(surface: &'static str, responder: Arc<dyn Responder>, delay: Duration) -> Self {
        let (loading_tx, _) = watch::channel(false);
        Self {
            surface,
            responder,
            delay,
            log: ConversationLog::new(),
            loading_tx,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Seed the log with an assistant greeting.
    pub fn with_greeting(self, greeting: impl Into<String>) -> Self {
        self.log.push(Turn::assistant(greeting));
        self
    }

    pub fn surface(&self) -> &'static str {
        self.surface
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Dispatch one user input and return the assistant turn.
    ///
    /// Empty (or whitespace-only) input is rejected with
    /// [`ChatError::EmptyMessage`]; input that arrives while a response is
    /// pending is rejected with [`ChatError::Busy`]. Rejections leave the
    /// log and the loading indicator untouched. A failed lookup is answered
    /// with [`APOLOGY`].
    pub async fn send(&self, input: &str) -> Result<Turn, ChatError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!(surface = self.surface, "Input rejected, response pending");
            return Err(ChatError::Busy);
        }
        let _pending = Pending {
            in_flight: &self.in_flight,
            loading_tx: &self.loading_tx,
        };

        self.log.push(Turn::user(input));
        self.loading_tx.send_replace(true);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let content = match self.responder.respond(input).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(surface = self.surface, error = %e, "Response lookup failed");
                APOLOGY.to_string()
            }
        };

        let turn = self.log.push(Turn::assistant(content));
        tracing::debug!(surface = self.surface, turns = self.log.len(), "Response appended");
        Ok(turn)
    }

    /// Whether a response is pending.
    pub fn is_loading(&self) -> bool {
        *self.loading_tx.borrow()
    }

    /// Observe the loading indicator.
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading_tx.subscribe()
    }

    /// Snapshot of the conversation, oldest first.
    pub fn turns(&self) -> Vec<Turn> {
        self.log.turns()
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }
}

// =============================================================================
// Tests
// =============================================================================
