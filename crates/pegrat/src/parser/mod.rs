//! # Parser Combinators
//!
//! A [`Parser<T>`] pairs a recognition [`Rule`] with a *construction step*
//! that turns a span the rule accepted into a `T`. Every combinator builds
//! the new rule and the new construction step together, so the two graphs
//! stay aligned node for node.
//!
//! ## Two-pass protocol
//!
//! [`Parser::parse_at`] first asks the rule whether it accepts (memoized, no
//! values built), then rewinds and runs the construction step over the
//! confirmed span, and finally moves the cursor to the recorded end. The
//! construction step re-walks child parsers the same way; with a full memo
//! table every re-check is a table hit. Construction never decides
//! acceptance on its own, so failed alternatives never build values.

mod combinators;
mod driver;
#[cfg(feature = "parallel")]
mod parallel;

pub use driver::parse;

use std::fmt;
use std::sync::Arc;

use crate::error::ParseError;
use crate::grammar::{AsRule, Rule};
use crate::memo::Memo;
use crate::source::Cursor;

/// Construction step: called with the cursor at the start of a span the
/// parser's rule accepted.
type Build<T> = Arc<dyn Fn(&mut Cursor, &mut dyn Memo) -> Result<T, ParseError> + Send + Sync>;

/// A rule paired with a typed construction step.
///
/// Cloning is cheap and shares the underlying rule and step.
pub struct Parser<T> {
    rule: Rule,
    build: Build<T>,
}

/// Parser whose value carries no information (literals, separators,
/// lookahead). `()` is zero-sized, so nothing is allocated for it.
pub type VoidParser = Parser<()>;

impl<T: 'static> Parser<T> {
    pub(crate) fn new<F>(rule: Rule, build: F) -> Self
    where
        F: Fn(&mut Cursor, &mut dyn Memo) -> Result<T, ParseError> + Send + Sync + 'static,
    {
        Self {
            rule,
            build: Arc::new(build),
        }
    }

    /// Parse at the cursor's position.
    ///
    /// On success the cursor is left at the end of the match. On failure it
    /// is restored to where it was and [`ParseError::Rejected`] is returned.
    ///
    /// # Errors
    ///
    /// [`ParseError::Rejected`] if the rule does not accept here;
    /// [`ParseError::Cursor`] on an internal positional fault.
    pub fn parse_at(&self, cursor: &mut Cursor, memo: &mut dyn Memo) -> Result<T, ParseError> {
        let start = cursor.position();
        if !self.rule.accept(cursor, memo) {
            cursor.rewind(start);
            return Err(ParseError::Rejected);
        }
        let end = cursor.position();

        cursor.rewind(start);
        let value = (self.build)(cursor, memo)?;
        cursor.jump(end)?;
        Ok(value)
    }
}

impl<T> Parser<T> {
    /// The rule this parser recognizes with.
    #[must_use]
    pub const fn rule(&self) -> &Rule {
        &self.rule
    }
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            rule: self.rule.clone(),
            build: Arc::clone(&self.build),
        }
    }
}

impl<T> AsRule for Parser<T> {
    fn as_rule(&self) -> &Rule {
        &self.rule
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("rule", &self.rule)
            .field("value", &std::any::type_name::<T>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memo::{FullMemo, NoMemo};

    #[test]
    fn test_parse_at_restores_on_rejection() {
        let parser = VoidParser::literal("ab");
        let mut cursor = Cursor::new("ac");

        assert_eq!(
            parser.parse_at(&mut cursor, &mut FullMemo::new()),
            Err(ParseError::Rejected)
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_parse_at_leaves_cursor_at_match_end() {
        let parser = Parser::characters("[a-z]", |c| c.is_ascii_lowercase());
        let mut cursor = Cursor::new("abc1");

        assert_eq!(
            parser.parse_at(&mut cursor, &mut NoMemo).as_deref(),
            Ok("abc")
        );
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_parse_at_continues_from_cursor() {
        let parser = Parser::character("[0-9]", |c| c.is_ascii_digit());
        let mut cursor = Cursor::new("x7");
        cursor.jump(1).unwrap();

        assert_eq!(parser.parse_at(&mut cursor, &mut FullMemo::new()), Ok('7'));
        assert!(!cursor.has_next());
    }

    #[test]
    fn test_debug_names_value_type() {
        let parser = Parser::character("any", |_| true);
        assert!(format!("{parser:?}").contains("char"));
    }
}
