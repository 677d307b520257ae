//! Rule tables.
//!
//! A [`RuleTable`] is an ordered list of rules followed by a designated
//! fallback. Declaration order is the priority order: more specific topics
//! must be declared before broader ones. The fallback lives in its own field,
//! so a table can never be built without one.

use std::borrow::Cow;
use std::fmt;

use crate::types::TopicId;

/// Produces the response text for a matched rule.
#[derive(Clone)]
pub enum Template {
    /// Fixed response text.
    Text(Cow<'static, str>),
    /// Response built from the triggers that matched.
    Render(fn(&[&str]) -> String),
}

impl Template {
    pub fn render(&self, matched: &[&str]) -> String {
        match self {
            Template::Text(text) => text.to_string(),
            Template::Render(f) => f(matched),
        }
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            Template::Render(_) => f.write_str("Render(..)"),
        }
    }
}

impl From<&'static str> for Template {
    fn from(text: &'static str) -> Self {
        Template::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Template {
    fn from(text: String) -> Self {
        Template::Text(Cow::Owned(text))
    }
}

/// A topic rule: lower-cased trigger substrings and a response template.
#[derive(Debug, Clone)]
pub struct Rule {
    topic: TopicId,
    triggers: Vec<Cow<'static, str>>,
    template: Template,
}

impl Rule {
    pub fn new<I, T>(topic: impl Into<TopicId>, triggers: I, template: impl Into<Template>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Cow<'static, str>>,
    {
        Self {
            topic: topic.into(),
            triggers: triggers
                .into_iter()
                .map(|t| {
                    let t: Cow<'static, str> = t.into();
                    if t.chars().any(char::is_uppercase) {
                        Cow::Owned(t.to_lowercase())
                    } else {
                        t
                    }
                })
                .collect(),
            template: template.into(),
        }
    }

    pub fn topic(&self) -> &TopicId {
        &self.topic
    }

    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.triggers.iter().map(|t| t.as_ref())
    }

    pub fn template(&self) -> &Template {
        &self.template
    }
}

/// Ordered rules plus the fallback returned when nothing matches.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    fallback: Rule,
}

impl RuleTable {
    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder { rules: Vec::new() }
    }

    /// Rules in priority order, excluding the fallback.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fallback(&self) -> &Rule {
        &self.fallback
    }

    /// Number of rules including the fallback.
    pub fn len(&self) -> usize {
        self.rules.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Look up a rule (or the fallback) by topic.
    pub fn get(&self, topic: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .chain(std::iter::once(&self.fallback))
            .find(|r| r.topic.as_str() == topic)
    }
}

/// Builder that only yields a [`RuleTable`] once a fallback is supplied.
#[derive(Debug)]
pub struct RuleTableBuilder {
    rules: Vec<Rule>,
}

impl RuleTableBuilder {
    /// Append a rule. Earlier rules take priority.
    pub fn rule<I, T>(
        mut self,
        topic: impl Into<TopicId>,
        triggers: I,
        template: impl Into<Template>,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Cow<'static, str>>,
    {
        self.rules.push(Rule::new(topic, triggers, template));
        self
    }

    /// Append a pre-built rule.
    pub fn push(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Finish the table with the rule returned when nothing else matches.
    pub fn fallback(self, topic: impl Into<TopicId>, template: impl Into<Template>) -> RuleTable {
        RuleTable {
            rules: self.rules,
            fallback: Rule::new(topic, std::iter::empty::<&'static str>(), template),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_are_lowercased() {
        let rule = Rule::new("xss", ["XSS", "Cross-Site Scripting"], "text");
        let triggers: Vec<&str> = rule.triggers().collect();
        assert_eq!(triggers, vec!["xss", "cross-site scripting"]);
    }

    #[test]
    fn test_builder_preserves_order_and_fallback() {
        let table = RuleTable::builder()
            .rule("a", ["alpha"], "A")
            .rule("b", ["beta"], "B")
            .fallback("fallback", "F");

        let topics: Vec<&str> = table.rules().iter().map(|r| r.topic().as_str()).collect();
        assert_eq!(topics, vec!["a", "b"]);
        assert_eq!(table.fallback().topic(), &TopicId::new("fallback"));
        assert_eq!(table.fallback().triggers().count(), 0);
        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_get_finds_rules_and_fallback() {
        let table = RuleTable::builder()
            .rule("a", ["alpha"], "A")
            .fallback("fallback", "F");
        assert!(table.get("a").is_some());
        assert!(table.get("fallback").is_some());
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn test_template_render() {
        let text: Template = "fixed".into();
        assert_eq!(text.render(&["ignored"]), "fixed");

        let owned: Template = String::from("owned").into();
        assert_eq!(owned.render(&[]), "owned");

        let render = Template::Render(|matched| format!("matched: {}", matched.join(", ")));
        assert_eq!(render.render(&["sql", "sqli"]), "matched: sql, sqli");
    }
}
