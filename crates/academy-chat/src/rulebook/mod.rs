//! Built-in rule books for the three chat surfaces.
//!
//! A [`RuleBook`] is one rule table plus the surface greeting. A
//! [`LabRuleBook`] is two-level: the active lab selects an inner table, and
//! labs without a table fall back to a global one.

pub mod general;
pub mod lab;
pub mod voice;

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::dispatcher::Responder;
use crate::error::ChatError;
use crate::matcher::{match_rule, RuleMatch};
use crate::rules::RuleTable;

pub use lab::LabContext;

// =============================================================================
// RuleBook
// =============================================================================

/// A single rule table and the greeting shown when a conversation opens.
#[derive(Debug, Clone)]
pub struct RuleBook {
    name: &'static str,
    greeting: Option<Cow<'static, str>>,
    table: RuleTable,
}

impl RuleBook {
    pub fn new(name: &'static str, table: RuleTable) -> Self {
        Self {
            name,
            greeting: None,
            table,
        }
    }

    pub fn with_greeting(mut self, greeting: impl Into<Cow<'static, str>>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    /// Rules for the general security assistant.
    pub fn general() -> Self {
        Self::new("assistant", general::table()).with_greeting(general::GREETING)
    }

    /// Rules for the voice guide.
    pub fn voice() -> Self {
        Self::new("voice", voice::table()).with_greeting(voice::GREETING)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn greeting(&self) -> Option<&str> {
        self.greeting.as_deref()
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn classify(&self, input: &str) -> RuleMatch<'_> {
        match_rule(input, &self.table)
    }
}

#[async_trait]
impl Responder for RuleBook {
    async fn respond(&self, input: &str) -> Result<String, ChatError> {
        let m = self.classify(input);
        tracing::debug!(book = self.name, topic = %m.topic(), "Rule selected");
        Ok(m.render())
    }
}

// =============================================================================
// LabRuleBook
// =============================================================================

#[derive(Debug, Clone)]
struct ContextRules {
    greeting: Cow<'static, str>,
    table: RuleTable,
}

/// Per-lab rule tables with a global table for unknown labs.
#[derive(Debug, Clone)]
pub struct LabRuleBook {
    contexts: HashMap<String, ContextRules>,
    global: ContextRules,
}

impl Default for LabRuleBook {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LabRuleBook {
    /// An empty book: every lab resolves to `global`.
    pub fn new(greeting: impl Into<Cow<'static, str>>, global: RuleTable) -> Self {
        Self {
            contexts: HashMap::new(),
            global: ContextRules {
                greeting: greeting.into(),
                table: global,
            },
        }
    }

    /// Register the inner table for one lab.
    pub fn with_context(
        mut self,
        context: impl Into<String>,
        greeting: impl Into<Cow<'static, str>>,
        table: RuleTable,
    ) -> Self {
        self.contexts.insert(
            context.into(),
            ContextRules {
                greeting: greeting.into(),
                table,
            },
        );
        self
    }

    /// The built-in labs.
    pub fn builtin() -> Self {
        lab::CONTEXTS.iter().fold(
            Self::new(lab::GLOBAL_GREETING, lab::global_table()),
            |book, ctx| book.with_context(ctx.id, ctx.greeting(), lab::context_table(ctx)),
        )
    }

    pub fn has_context(&self, context: &str) -> bool {
        self.contexts.contains_key(context)
    }

    /// Known lab ids, sorted.
    pub fn contexts(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.contexts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    fn rules_for(&self, context: &str) -> &ContextRules {
        self.contexts.get(context).unwrap_or(&self.global)
    }

    /// Inner table for `context`, or the global table.
    pub fn table_for(&self, context: &str) -> &RuleTable {
        &self.rules_for(context).table
    }

    pub fn greeting(&self, context: &str) -> &str {
        &self.rules_for(context).greeting
    }

    /// Resolve the lab first, then match within its table.
    pub fn classify(&self, context: &str, input: &str) -> RuleMatch<'_> {
        match_rule(input, self.table_for(context))
    }

    /// A responder bound to one lab.
    pub fn responder(self: &Arc<Self>, context: impl Into<String>) -> LabResponder {
        LabResponder {
            book: Arc::clone(self),
            context: context.into(),
        }
    }
}

/// [`Responder`] that answers within one lab context.
#[derive(Debug, Clone)]
pub struct LabResponder {
    book: Arc<LabRuleBook>,
    context: String,
}

impl LabResponder {
    pub fn context(&self) -> &str {
        &self.context
    }
}

#[async_trait]
impl Responder for LabResponder {
    async fn respond(&self, input: &str) -> Result<String, ChatError> {
        let m = self.book.classify(&self.context, input);
        tracing::debug!(context = %self.context, topic = %m.topic(), "Lab rule selected");
        Ok(m.render())
    }
}

// =============================================================================
// Tests
// =============================================================================
