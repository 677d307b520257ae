//! Append-only conversation log.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ChatError;
use crate::types::Turn;

/// Ordered record of the turns exchanged on one surface.
///
/// Turns are only ever appended; nothing is edited, removed, or reordered.
#[derive(Debug)]
pub struct ConversationLog {
    id: Uuid,
    started_at: DateTime<Utc>,
    turns: Mutex<Vec<Turn>>,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    id: Uuid,
    started_at: DateTime<Utc>,
    turns: &'a [Turn],
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationLog {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            turns: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Turn>> {
        self.turns.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Append a turn and return a copy of it.
    pub fn push(&self, turn: Turn) -> Turn {
        let copy = turn.clone();
        self.lock().push(turn);
        copy
    }

    /// Snapshot of every turn, oldest first.
    pub fn turns(&self) -> Vec<Turn> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn last(&self) -> Option<Turn> {
        self.lock().last().cloned()
    }

    /// Export the log as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ChatError> {
        let turns = self.lock();
        let snapshot = Snapshot {
            id: self.id,
            started_at: self.started_at,
            turns: &turns,
        };
        serde_json::to_string_pretty(&snapshot).map_err(|e| ChatError::Export(e.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_push_preserves_order() {
        let log = ConversationLog::new();
        assert!(log.is_empty());

        log.push(Turn::assistant("greeting"));
        log.push(Turn::user("question"));
        let answer = log.push(Turn::assistant("answer"));

        assert_eq!(log.len(), 3);
        let roles: Vec<Role> = log.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(log.last().unwrap().id, answer.id);
    }

    #[test]
    fn test_turns_is_a_snapshot() {
        let log = ConversationLog::new();
        log.push(Turn::user("one"));
        let snapshot = log.turns();
        log.push(Turn::user("two"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_to_json() {
        let log = ConversationLog::new();
        log.push(Turn::user("what is xss"));
        let json = log.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], log.id().to_string());
        assert_eq!(value["turns"][0]["role"], "user");
        assert_eq!(value["turns"][0]["content"], "what is xss");
    }
}
