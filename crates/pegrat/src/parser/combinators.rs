//! Combinators over [`Parser`].
//!
//! Each one builds the new [`Rule`] from the operands' rules and a
//! construction step that re-walks the operands through
//! [`Parser::parse_at`], so the value is only ever built over a span the
//! rule has already confirmed.

use std::sync::Arc;

use compact_str::CompactString;

use crate::error::{GrammarError, ParseError};
use crate::grammar::{Alt, AsRule, Forward, Rule};
use crate::memo::Memo;
use crate::source::{Cursor, Location};

use super::{Parser, VoidParser};

impl<T: 'static> From<Parser<T>> for Alt<Parser<T>> {
    fn from(parser: Parser<T>) -> Self {
        Self::ready(parser)
    }
}

impl<T: 'static> From<&Parser<T>> for Alt<Parser<T>> {
    fn from(parser: &Parser<T>) -> Self {
        Self::ready(parser.clone())
    }
}

/// Run `parser`, turning a rejection into `None` so callers can move on.
fn attempt<T: 'static>(
    parser: &Parser<T>,
    cursor: &mut Cursor,
    memo: &mut dyn Memo,
) -> Result<Option<T>, ParseError> {
    match parser.parse_at(cursor, memo) {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_rejection() => Ok(None),
        Err(err) => Err(err),
    }
}

impl<T: 'static> Parser<T> {
    /// Sequence: this parser, then `next`, combining both values.
    #[must_use]
    pub fn then<U, R, F>(&self, next: &Parser<U>, combine: F) -> Parser<R>
    where
        U: 'static,
        R: 'static,
        F: Fn(T, U) -> R + Send + Sync + 'static,
    {
        let first = self.clone();
        let second = next.clone();
        Parser::new(self.rule.then(&next.rule), move |cursor, memo| {
            let left = first.parse_at(cursor, memo)?;
            let right = second.parse_at(cursor, memo)?;
            Ok(combine(left, right))
        })
    }

    /// Sequence with a void parser whose (empty) value is dropped.
    #[must_use]
    pub fn then_ignore(&self, next: &VoidParser) -> Self {
        self.then(next, |value, ()| value)
    }

    /// Sequence with a literal that must follow this parser.
    #[must_use]
    pub fn then_literal(&self, text: impl Into<CompactString>) -> Self {
        self.then_ignore(&VoidParser::literal(text))
    }

    /// Ordered choice: the first alternative whose rule accepts builds the value.
    ///
    /// Alternatives may be lazy ([`Alt::lazy`], or a [`Forward`] converted
    /// with `Alt::from(&forward)`) to refer to parsers defined later.
    ///
    /// # Errors
    ///
    /// [`GrammarError::EmptyChoice`] if no alternatives are given.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pegrat::{Parser, VoidParser};
    ///
    /// let yes = VoidParser::literal("yes").map(|()| true);
    /// let no = VoidParser::literal("no").map(|()| false);
    /// let answer = Parser::or([yes, no]).unwrap();
    ///
    /// assert_eq!(answer.parse("no"), Ok(false));
    /// ```
    pub fn or<I, A>(alternatives: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Alt<Self>>,
    {
        let alternatives: Arc<[Arc<Alt<Self>>]> = alternatives
            .into_iter()
            .map(|alternative| Arc::new(alternative.into()))
            .collect();

        let rule = Rule::choice(alternatives.iter().map(|alternative| {
            match alternative.get() {
                Some(parser) => Alt::ready(parser.rule.clone()),
                None => {
                    let alternative = Arc::clone(alternative);
                    Alt::lazy(move || alternative.resolve().rule.clone())
                }
            }
        }))?;

        Ok(Self::new(rule, move |cursor, memo| {
            for alternative in alternatives.iter() {
                if let Some(value) = attempt(alternative.resolve(), cursor, memo)? {
                    return Ok(value);
                }
            }
            Err(ParseError::Rejected)
        }))
    }

    /// Zero or more repetitions, collected in input order.
    #[must_use]
    pub fn star(&self) -> Parser<Vec<T>> {
        let inner = self.clone();
        Parser::new(self.rule.star(), move |cursor, memo| {
            let mut items = Vec::new();
            while let Some(item) = attempt(&inner, cursor, memo)? {
                items.push(item);
            }
            Ok(items)
        })
    }

    /// One or more repetitions, collected in input order.
    #[must_use]
    pub fn plus(&self) -> Parser<Vec<T>> {
        let inner = self.clone();
        Parser::new(self.rule.plus(), move |cursor, memo| {
            let mut items = vec![inner.parse_at(cursor, memo)?];
            while let Some(item) = attempt(&inner, cursor, memo)? {
                items.push(item);
            }
            Ok(items)
        })
    }

    /// Zero or one occurrence.
    #[must_use]
    pub fn option(&self) -> Parser<Option<T>> {
        let inner = self.clone();
        Parser::new(self.rule.option(), move |cursor, memo| {
            attempt(&inner, cursor, memo)
        })
    }

    /// Transform the value. The rule is shared with this parser.
    #[must_use]
    pub fn map<R, F>(&self, transform: F) -> Parser<R>
    where
        R: 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        let build = Arc::clone(&self.build);
        Parser::new(self.rule.clone(), move |cursor, memo| {
            build(cursor, memo).map(&transform)
        })
    }

    /// Pair the value with the span it was built from.
    #[must_use]
    pub fn with_location(&self) -> Parser<(T, Location)> {
        let build = Arc::clone(&self.build);
        Parser::new(self.rule.clone(), move |cursor, memo| {
            let start = cursor.position();
            let value = build(cursor, memo)?;
            let location = Location::new(Arc::clone(cursor.source()), start, cursor.position())?;
            Ok((value, location))
        })
    }

    /// Keep the rule, drop the value.
    #[must_use]
    pub fn to_void(&self) -> VoidParser {
        VoidParser::from_rule(&self.rule)
    }
}

impl VoidParser {
    /// Match `text` exactly.
    #[must_use]
    pub fn literal(text: impl Into<CompactString>) -> Self {
        Self::from_rule(&Rule::literal(text))
    }

    /// Match whatever `rule` matches, producing no value.
    #[must_use]
    pub fn from_rule(rule: &Rule) -> Self {
        let rule = rule.clone();
        let end_of = rule.clone();
        Self::new(rule, move |cursor, memo| {
            if end_of.accept(cursor, memo) {
                Ok(())
            } else {
                Err(ParseError::Rejected)
            }
        })
    }

    /// Succeeds without consuming input if `target` matches here.
    #[must_use]
    pub fn and(target: &impl AsRule) -> Self {
        Self::from_rule(&target.as_rule().and())
    }

    /// Succeeds without consuming input if `target` does not match here.
    #[must_use]
    pub fn not(target: &impl AsRule) -> Self {
        Self::from_rule(&target.as_rule().not())
    }

    /// Sequence where only `next` carries a value.
    #[must_use]
    pub fn ignore_then<T: 'static>(&self, next: &Parser<T>) -> Parser<T> {
        self.then(next, |(), value| value)
    }

    /// Sequence of two void parsers.
    #[must_use]
    pub fn then_void(&self, next: &Self) -> Self {
        self.then(next, |(), ()| ())
    }
}

impl Parser<char> {
    /// A single character accepted by `predicate`.
    ///
    /// `description` names the character class in grammar listings.
    #[must_use]
    pub fn character<F>(description: impl Into<CompactString>, predicate: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        Self::new(Rule::predicate(description, predicate), |cursor, _memo| {
            Ok(cursor.next()?)
        })
    }
}

impl Parser<String> {
    /// One or more characters accepted by `predicate`; the value is the
    /// matched text.
    #[must_use]
    pub fn characters<F>(description: impl Into<CompactString>, predicate: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        let rule = Rule::predicate(description, predicate).plus();
        let run = rule.clone();
        Self::new(rule, move |cursor, memo| {
            let start = cursor.position();
            if !run.accept(cursor, memo) {
                return Err(ParseError::Rejected);
            }
            Ok(cursor.substring(start, cursor.position())?)
        })
    }
}

impl<T: 'static> From<&Forward<Parser<T>>> for Parser<T> {
    /// A parser that defers to whatever the forward declaration is bound to.
    ///
    /// Its rule is a single lazy choice alternative, resolved on first use.
    fn from(forward: &Forward<Parser<T>>) -> Self {
        let alternative = Arc::new(Alt::from(forward));
        let target = Arc::clone(&alternative);
        let rule = Rule::deferred(Alt::lazy(move || target.resolve().rule.clone()));
        Self::new(rule, move |cursor, memo| {
            alternative.resolve().parse_at(cursor, memo)
        })
    }
}
