//! Conversational response engine for the academy.
//!
//! Classifies free-form questions against ordered keyword rule tables,
//! dispatches answers with a simulated thinking delay, and records every
//! exchange in an append-only conversation log. Three surfaces are built on
//! top: the general assistant, the per-lab assistant, and the voice guide.

pub mod conversation;
pub mod dispatcher;
pub mod error;
pub mod matcher;
pub mod rulebook;
pub mod rules;
pub mod surface;
pub mod types;

pub use conversation::ConversationLog;
pub use dispatcher::{Responder, ResponseDispatcher, APOLOGY};
pub use error::ChatError;
pub use matcher::{match_rule, RuleMatch};
pub use rulebook::{LabContext, LabResponder, LabRuleBook, RuleBook};
pub use rules::{Rule, RuleTable, RuleTableBuilder, Template};
pub use surface::{GeneralAssistant, LabAssistant, VoiceGuide};
pub use types::{Role, TopicId, Turn};
