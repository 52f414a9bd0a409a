//! Top-level parse entry points.

use std::sync::Arc;

use tracing::debug;

use crate::config::ParseConfig;
use crate::error::ParseError;
use crate::source::{Cursor, Located, Location};

use super::Parser;

impl<T: 'static> Parser<T> {
    /// Parse the start of `input` with packrat memoization.
    ///
    /// The match may end before the input does; use
    /// [`parse_located`](Self::parse_located) to see where it stopped.
    ///
    /// # Errors
    ///
    /// [`ParseError::Rejected`] if the parser does not accept at position 0.
    pub fn parse(&self, input: &str) -> Result<T, ParseError> {
        self.parse_with(input, &ParseConfig::default())
    }

    /// Parse the start of `input` with the given configuration.
    ///
    /// # Errors
    ///
    /// [`ParseError::Rejected`] if the parser does not accept at position 0.
    pub fn parse_with(&self, input: &str, config: &ParseConfig) -> Result<T, ParseError> {
        self.parse_located_with(input, config).map(Located::into_value)
    }

    /// Parse the start of `input`, returning the value with the span it covers.
    ///
    /// # Errors
    ///
    /// [`ParseError::Rejected`] if the parser does not accept at position 0.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pegrat::Parser;
    ///
    /// let word = Parser::characters("[a-z]", |c| c.is_ascii_lowercase());
    /// let parsed = word.parse_located("hello world").unwrap();
    ///
    /// assert_eq!(parsed.value, "hello");
    /// assert_eq!(parsed.location.end(), 5);
    /// ```
    pub fn parse_located(&self, input: &str) -> Result<Located<T>, ParseError> {
        self.parse_located_with(input, &ParseConfig::default())
    }

    /// [`parse_located`](Self::parse_located) with the given configuration.
    ///
    /// # Errors
    ///
    /// [`ParseError::Rejected`] if the parser does not accept at position 0.
    pub fn parse_located_with(
        &self,
        input: &str,
        config: &ParseConfig,
    ) -> Result<Located<T>, ParseError> {
        let mut cursor = Cursor::new(input);
        let mut memo = config.memo();

        let outcome = self.parse_at(&mut cursor, &mut memo);
        debug!(
            rule = %self.rule().id(),
            input_len = cursor.len(),
            strategy = ?config.memoization,
            accepted = outcome.is_ok(),
            end = cursor.position(),
            stats = ?memo.stats(),
            "parse finished"
        );

        let value = outcome?;
        let location = Location::new(Arc::clone(cursor.source()), 0, cursor.position())?;
        Ok(Located::new(value, location))
    }
}

/// Parse the start of `input` with `root`, using packrat memoization.
///
/// # Errors
///
/// [`ParseError::Rejected`] if `root` does not accept at position 0.
pub fn parse<T: 'static>(root: &Parser<T>, input: &str) -> Result<T, ParseError> {
    root.parse(input)
}
