//! # Grammar Listing
//!
//! Renders the rule graph reachable from a root as one line per rule, in the
//! usual PEG notation:
//!
//! ```text
//! <intList> ::= "[" [0-9]+ <4>* "]"
//! <4> ::= ", " [0-9]+
//! ```
//!
//! Rules are listed breadth-first and each identity at most once, so shared
//! and cyclic grammars render finitely. Only sequences, choices and named
//! rules get a line of their own; terminals and unary combinators are written
//! inline where they are used. Unnamed rules are shown by numeric id.
//!
//! The analyzer only reads the graph. Listing a grammar does resolve lazy
//! choice alternatives, exactly as the first parse through them would.

use std::collections::VecDeque;
use std::fmt;

use compact_str::CompactString;
use hashbrown::{HashMap, HashSet};

use crate::grammar::{AsRule, Rule, RuleId, RuleKind};

/// One rendered rule: `<name> ::= rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct GrammarLine {
    pub id: RuleId,
    /// Registered name, or the id when the rule is unnamed
    pub name: String,
    pub rhs: String,
}

impl fmt::Display for GrammarLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> ::= {}", self.name, self.rhs)
    }
}

/// Grammar renderer with a registry of display names.
#[derive(Debug, Default, Clone)]
pub struct RuleAnalyzer {
    names: HashMap<RuleId, CompactString, ahash::RandomState>,
}

impl RuleAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `rule` as `<name>` instead of its id, and give it its own line.
    pub fn set_name(&mut self, rule: &impl AsRule, name: impl Into<CompactString>) {
        self.names.insert(rule.as_rule().id(), name.into());
    }

    #[must_use]
    pub fn name(&self, rule: &impl AsRule) -> Option<&str> {
        self.names.get(&rule.as_rule().id()).map(CompactString::as_str)
    }

    /// Lines for every rule reachable from `root`, root first.
    #[must_use]
    pub fn lines(&self, root: &impl AsRule) -> Vec<GrammarLine> {
        let root = root.as_rule();
        let mut lines = Vec::new();
        let mut queue = VecDeque::from([root.clone()]);
        let mut seen = HashSet::with_hasher(ahash::RandomState::new());
        seen.insert(root.id());

        while let Some(target) = queue.pop_front() {
            lines.push(self.line(&target));

            for child in target.children() {
                let child = self.look_through(child);
                let listed = self.names.contains_key(&child.id())
                    || matches!(child.kind(), RuleKind::Sequence | RuleKind::Choice);
                if listed && seen.insert(child.id()) {
                    queue.push_back(child);
                }
            }
        }

        lines
    }

    /// The full listing, one line per rule, each terminated by `\n`.
    #[must_use]
    pub fn analyze(&self, root: &impl AsRule) -> String {
        let mut out = String::new();
        for line in self.lines(root) {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out
    }

    /// A single rule's line, without a trailing newline.
    #[must_use]
    pub fn describe(&self, rule: &impl AsRule) -> String {
        self.line(rule.as_rule()).to_string()
    }

    fn line(&self, rule: &Rule) -> GrammarLine {
        let mut rhs = String::new();
        match rule.kind() {
            RuleKind::Sequence | RuleKind::Choice => {
                let separator = if rule.kind() == RuleKind::Sequence { " " } else { "/" };
                for (i, child) in rule.children().iter().enumerate() {
                    if i > 0 {
                        rhs.push_str(separator);
                    }
                    self.write_reference(child, &mut rhs);
                }
            }
            _ => self.write_inline(rule, &mut rhs),
        }

        GrammarLine {
            id: rule.id(),
            name: self.display_name(rule),
            rhs,
        }
    }

    /// Unnamed unary wrappers are listed through their operand, however deeply nested.
    fn look_through(&self, mut rule: Rule) -> Rule {
        while rule.kind().is_unary() && !self.names.contains_key(&rule.id()) {
            match rule.children().into_iter().next() {
                Some(inner) => rule = inner,
                None => break,
            }
        }
        rule
    }

    fn display_name(&self, rule: &Rule) -> String {
        match self.names.get(&rule.id()) {
            Some(name) => name.to_string(),
            None => rule.id().to_string(),
        }
    }

    fn write_reference(&self, rule: &Rule, out: &mut String) {
        match self.names.get(&rule.id()) {
            Some(name) => {
                out.push('<');
                out.push_str(name);
                out.push('>');
            }
            None => self.write_inline(rule, out),
        }
    }

    /// Notation for `rule` itself, ignoring any name it has.
    fn write_inline(&self, rule: &Rule, out: &mut String) {
        if let Some(description) = rule.description() {
            out.push_str(&description);
            return;
        }

        let kind = rule.kind();
        if kind.is_unary() {
            if let Some(inner) = rule.children().first() {
                match kind {
                    RuleKind::And => out.push('&'),
                    RuleKind::Not => out.push('!'),
                    _ => {}
                }
                self.write_reference(inner, out);
                match kind {
                    RuleKind::Star => out.push('*'),
                    RuleKind::Plus => out.push('+'),
                    RuleKind::Option => out.push('?'),
                    _ => {}
                }
                return;
            }
        }

        out.push('<');
        out.push_str(&rule.id().to_string());
        out.push('>');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Alt, Forward};

    #[test]
    fn test_terminals_and_unary_combinators_render_inline() {
        let digit = Rule::predicate("[0-9]", |c| c.is_ascii_digit());
        let rule = Rule::sequence([
            Rule::literal("-").option(),
            digit.plus(),
            Rule::literal(".").and(),
            Rule::literal("e").not(),
            digit.star(),
        ])
        .unwrap();

        let analyzer = RuleAnalyzer::new();
        assert_eq!(
            analyzer.describe(&rule),
            format!("<{}> ::= \"-\"? [0-9]+ &\".\" !\"e\" [0-9]*", rule.id())
        );
    }

    #[test]
    fn test_named_rules_get_their_own_line() {
        let digit = Rule::predicate("[0-9]", |c| c.is_ascii_digit());
        let number = digit.plus();
        let pair = number.then(&Rule::literal(",")).then(&number);

        let mut analyzer = RuleAnalyzer::new();
        analyzer.set_name(&pair, "pair");
        analyzer.set_name(&number, "number");

        assert_eq!(analyzer.name(&number), Some("number"));
        assert_eq!(
            analyzer.analyze(&pair),
            "<pair> ::= <number> \",\" <number>\n<number> ::= [0-9]+\n"
        );
    }

    #[test]
    fn test_nested_wrappers_still_list_the_sequence() {
        // bracketed ::= "[" ("a" "b")*? "]"
        let pair = Rule::literal("a").then(&Rule::literal("b"));
        let root = Rule::sequence([Rule::literal("["), pair.star().option(), Rule::literal("]")])
            .unwrap();

        let analyzer = RuleAnalyzer::new();
        assert_eq!(
            analyzer.analyze(&root),
            format!(
                "<{root}> ::= \"[\" <{pair}>*? \"]\"\n<{pair}> ::= \"a\" \"b\"\n",
                root = root.id(),
                pair = pair.id()
            )
        );
    }

    #[test]
    fn test_named_wrapper_stops_look_through() {
        let pair = Rule::literal("a").then(&Rule::literal("b"));
        let pairs = pair.star();
        let root = Rule::literal("[").then(&pairs.not().option());

        let mut analyzer = RuleAnalyzer::new();
        analyzer.set_name(&pairs, "pairs");

        let lines = analyzer.lines(&root);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].to_string(), format!("<pairs> ::= <{}>*", pair.id()));
        assert_eq!(lines[2].id, pair.id());
    }

    #[test]
    fn test_cyclic_grammar_renders_each_rule_once() {
        // list ::= item ("," list)?  with the recursion through a choice
        let list: Forward<Rule> = Forward::named("list");
        let item = Rule::literal("x");
        let tail = Rule::literal(",")
            .then(&Rule::choice([Alt::from(&list)]).unwrap())
            .option();
        let rule = item.then(&tail);
        list.define(rule.clone()).unwrap();

        let mut analyzer = RuleAnalyzer::new();
        analyzer.set_name(&rule, "list");

        let lines = analyzer.lines(&rule);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].to_string(), format!("<list> ::= \"x\" <{}>?", lines[1].id));
        assert!(lines[1].rhs.starts_with("\",\" "));
        assert_eq!(lines[2].rhs, "<list>");
    }
}
