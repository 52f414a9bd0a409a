//! Recognition: does a rule match at the cursor, and where does the match end?

use tracing::trace;

use crate::config::ParseConfig;
use crate::grammar::rule::{Rule, RuleBody};
use crate::memo::{Memo, MemoEntry, NoMemo};
use crate::source::Cursor;

impl Rule {
    /// Try to match this rule at the cursor's position.
    ///
    /// On success the cursor sits at the end of the match. On failure its
    /// position is unspecified: callers that need to backtrack save the
    /// position before calling and restore it themselves.
    ///
    /// The memo table is consulted first; a known outcome is returned
    /// without evaluating the rule again, and a fresh outcome is recorded.
    pub fn accept(&self, cursor: &mut Cursor, memo: &mut dyn Memo) -> bool {
        let start = cursor.position();
        match memo.lookup(self.id(), start) {
            MemoEntry::Accepted(end) => {
                cursor.rewind(end);
                true
            }
            MemoEntry::Rejected => false,
            MemoEntry::Unknown => {
                let accepted = self.evaluate(cursor, memo);
                if accepted {
                    memo.record_accept(self.id(), start, cursor.position());
                } else {
                    memo.record_reject(self.id(), start);
                }
                trace!(
                    rule = %self.id(),
                    kind = ?self.kind(),
                    start,
                    end = cursor.position(),
                    accepted,
                    "evaluated rule"
                );
                accepted
            }
        }
    }

    /// Match this rule against the start of `input`.
    ///
    /// Returns the end position of the accepted prefix, or `None` if the
    /// rule rejects.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pegrat::grammar::Rule;
    /// use pegrat::ParseConfig;
    ///
    /// let digits = Rule::predicate("[0-9]", |c| c.is_ascii_digit()).plus();
    /// assert_eq!(digits.recognize("123abc", &ParseConfig::default()), Some(3));
    /// assert_eq!(digits.recognize("abc", &ParseConfig::default()), None);
    /// ```
    #[must_use]
    pub fn recognize(&self, input: &str, config: &ParseConfig) -> Option<usize> {
        let mut cursor = Cursor::new(input);
        let mut memo = config.memo();
        self.accept(&mut cursor, &mut memo).then(|| cursor.position())
    }

    fn evaluate(&self, cursor: &mut Cursor, memo: &mut dyn Memo) -> bool {
        match self.body() {
            // No rollback on a partial match; the caller restores.
            RuleBody::Literal(text) => text
                .chars()
                .all(|expected| cursor.next().is_ok_and(|c| c == expected)),
            RuleBody::Predicate { test, .. } => cursor.next().is_ok_and(|c| test(c)),
            RuleBody::Sequence(rules) => rules.iter().all(|rule| rule.accept(cursor, memo)),
            RuleBody::Choice(alternatives) => {
                let start = cursor.position();
                for alternative in alternatives {
                    if alternative.resolve().accept(cursor, memo) {
                        return true;
                    }
                    cursor.rewind(start);
                }
                false
            }
            RuleBody::Star(inner) => {
                repeat(inner, cursor, memo);
                true
            }
            RuleBody::Plus(inner) => {
                if !inner.accept(cursor, memo) {
                    return false;
                }
                repeat(inner, cursor, memo);
                true
            }
            RuleBody::Option(inner) => {
                let start = cursor.position();
                if !inner.accept(cursor, memo) {
                    cursor.rewind(start);
                }
                true
            }
            RuleBody::And(inner) => lookahead(inner, cursor),
            RuleBody::Not(inner) => !lookahead(inner, cursor),
        }
    }
}

/// Match `inner` as often as possible, leaving the cursor after the last success.
fn repeat(inner: &Rule, cursor: &mut Cursor, memo: &mut dyn Memo) {
    loop {
        let position = cursor.position();
        if !inner.accept(cursor, memo) {
            cursor.rewind(position);
            return;
        }
    }
}

/// Speculative match that never consumes input.
///
/// Runs under a no-op memo so the enclosing table never records a
/// lookahead's boundary as a consuming match.
fn lookahead(inner: &Rule, cursor: &mut Cursor) -> bool {
    let start = cursor.position();
    let matched = inner.accept(cursor, &mut NoMemo);
    cursor.rewind(start);
    matched
}
