//! Intent matcher.
//!
//! First-match-wins over a [`RuleTable`]: the input is lower-cased and
//! compared against each rule's triggers as literal substrings, in
//! declaration order. No tokenization, stemming, or scoring.

use crate::rules::{Rule, RuleTable};
use crate::types::TopicId;

/// The rule selected for an input.
#[derive(Debug, Clone)]
pub struct RuleMatch<'t> {
    pub rule: &'t Rule,
    /// Triggers of `rule` found in the input. Empty for the fallback.
    pub matched: Vec<&'t str>,
}

impl RuleMatch<'_> {
    pub fn topic(&self) -> &TopicId {
        self.rule.topic()
    }

    pub fn is_fallback(&self) -> bool {
        self.matched.is_empty()
    }

    /// Render the response text for this match.
    pub fn render(&self) -> String {
        self.rule.template().render(&self.matched)
    }
}

/// Select the first rule with a trigger contained in `input`, or the
/// table's fallback. Pure function of its arguments.
pub fn match_rule<'t>(input: &str, table: &'t RuleTable) -> RuleMatch<'t> {
    let lowered = input.to_lowercase();

    for rule in table.rules() {
        let matched: Vec<&str> = rule.triggers().filter(|t| lowered.contains(t)).collect();
        if !matched.is_empty() {
            return RuleMatch { rule, matched };
        }
    }

    RuleMatch {
        rule: table.fallback(),
        matched: Vec::new(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RuleTable {
        RuleTable::builder()
            .rule("short", ["sql"], "short")
            .rule("long", ["sql injection", "sqli"], "long")
            .rule("xss", ["xss", "cross-site scripting"], "xss")
            .fallback("fallback", "fallback")
    }

    #[test]
    fn test_earlier_rule_wins_over_more_specific_later_rule() {
        let t = table();
        let m = match_rule("what is sql injection", &t);
        assert_eq!(m.topic(), &TopicId::new("short"));
        assert_eq!(m.render(), "short");
    }

    #[test]
    fn test_reordering_changes_winner() {
        let t = RuleTable::builder()
            .rule("long", ["sql injection"], "long")
            .rule("short", ["sql"], "short")
            .fallback("fallback", "fallback");
        assert_eq!(match_rule("sql injection", &t).topic(), &TopicId::new("long"));
        assert_eq!(match_rule("sql", &t).topic(), &TopicId::new("short"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let t = table();
        assert_eq!(match_rule("Explain XSS", &t).topic(), &TopicId::new("xss"));
        assert_eq!(
            match_rule("CROSS-SITE SCRIPTING?", &t).topic(),
            &TopicId::new("xss")
        );
    }

    #[test]
    fn test_triggers_match_as_plain_substrings() {
        let t = table();
        // "sql" is found inside "mysql"; no word boundaries are applied.
        assert_eq!(match_rule("mysql tips", &t).topic(), &TopicId::new("short"));
        // Regex metacharacters are literal.
        let t = RuleTable::builder()
            .rule("dot", ["a.b"], "dot")
            .fallback("fallback", "fallback");
        assert!(match_rule("axb", &t).is_fallback());
        assert_eq!(match_rule("a.b", &t).topic(), &TopicId::new("dot"));
    }

    #[test]
    fn test_no_match_returns_fallback() {
        let t = table();
        let m = match_rule("banana", &t);
        assert!(m.is_fallback());
        assert_eq!(m.topic(), &TopicId::new("fallback"));
        assert_eq!(m.render(), "fallback");
    }

    #[test]
    fn test_every_input_yields_exactly_one_rule() {
        let t = table();
        for input in ["", " ", "sql", "xss sql", "???", "ünïcödé", "a much longer question"] {
            let m = match_rule(input, &t);
            assert!(!m.render().is_empty());
        }
    }

    #[test]
    fn test_fallback_only_table() {
        let t = RuleTable::builder().fallback("only", "only");
        assert_eq!(match_rule("anything", &t).topic(), &TopicId::new("only"));
    }

    #[test]
    fn test_matched_triggers_are_reported() {
        let t = table();
        let m = match_rule("sqli or sql injection?", &t);
        // "short" wins first with its single trigger.
        assert_eq!(m.matched, vec!["sql"]);

        let t = RuleTable::builder()
            .rule("long", ["sql injection", "sqli"], "long")
            .fallback("fallback", "fallback");
        let m = match_rule("sqli or sql injection?", &t);
        assert_eq!(m.matched, vec!["sql injection", "sqli"]);
    }

    #[test]
    fn test_render_template_receives_matched_triggers() {
        let t = RuleTable::builder()
            .rule(
                "echo",
                ["nmap", "wireshark"],
                crate::rules::Template::Render(|m| m.join("+")),
            )
            .fallback("fallback", "fallback");
        assert_eq!(match_rule("nmap vs wireshark", &t).render(), "nmap+wireshark");
    }
}
