//! # Error Types
//!
//! Error types for cursor movement, grammar assembly and top-level parsing.
//!
//! ## Overview
//!
//! Rejection of input by a rule is *not* an error: recognition reports it as
//! `false` and backtracking combinators consume that signal locally. Only three
//! conditions are ever visible to a grammar author:
//!
//! - [`ParseError::Rejected`]: the root rule did not accept at the start of the input
//! - [`CursorError`]: a read past the end or a jump outside the buffer
//! - [`GrammarError`]: a malformed combinator, reported while the grammar is assembled
//!
//! ## Diagnostics Support
//!
//! When the `diagnostics` feature is enabled, errors integrate with [`miette`]
//! and carry stable diagnostic codes.

use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// Faults raised by [`Cursor`](crate::source::Cursor) movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum CursorError {
    /// A character was requested at the end of the buffer.
    ///
    /// Rule evaluators recover from this locally as an ordinary rejection.
    #[error("unexpected end of input at position {position}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pegrat::cursor::end_of_input)))]
    EndOfInput { position: usize },

    /// A jump target lies outside `0..=length`.
    ///
    /// The engine only jumps to positions it observed on the same cursor, so
    /// this signals a logic error rather than bad input.
    #[error("position {position} is out of range for input of length {length}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pegrat::cursor::out_of_range)))]
    OutOfRange { position: usize, length: usize },
}

/// Errors detected while a grammar is being assembled, before any input is seen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum GrammarError {
    #[error("an ordered choice needs at least one alternative")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(pegrat::grammar::empty_choice))
    )]
    EmptyChoice,

    #[error("a sequence needs at least one element")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(pegrat::grammar::empty_sequence))
    )]
    EmptySequence,

    #[error("forward declaration `{what}` was already defined")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(pegrat::grammar::already_defined))
    )]
    AlreadyDefined { what: String },
}

/// Failure of a top-level parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum ParseError {
    /// The root rule rejected the input.
    ///
    /// Carries no trace of the alternatives that were tried.
    #[error("input was rejected by the grammar")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(
            code(pegrat::rejected),
            help("the root rule does not match at the start of the input")
        )
    )]
    Rejected,

    /// A positional fault inside the engine.
    #[error(transparent)]
    #[cfg_attr(feature = "diagnostics", diagnostic(transparent))]
    Cursor(#[from] CursorError),
}

impl ParseError {
    /// Whether this is an ordinary rejection rather than an engine fault.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}
