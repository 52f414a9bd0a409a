//! # Pegrat
//!
//! A packrat parsing-expression-grammar engine built from composable
//! combinators.
//!
//! ## Overview
//!
//! Parsing is split into two layers that are built together but run
//! separately:
//!
//! - **Recognition** ([`grammar`]): a graph of [`Rule`] nodes that only decides
//!   whether input matches and where the match ends. Outcomes are memoized per
//!   `(rule, position)`, so each pair is evaluated at most once per parse.
//! - **Construction** ([`parser`]): every [`Parser<T>`] wraps one rule and a
//!   step that builds a `T` from a span the rule already accepted. Values are
//!   only built for the parse tree that finally matched; alternatives that
//!   failed during backtracking never allocate results.
//!
//! ## Quick Start
//!
//! ```rust
//! use pegrat::{Parser, VoidParser};
//!
//! // int ::= [0-9]+  (literals that overflow u32 become errors)
//! let int = Parser::characters("[0-9]", |c| c.is_ascii_digit())
//!     .map(|digits| digits.parse::<u32>());
//!
//! // list ::= "[" int (", " int)* "]"
//! let rest = VoidParser::literal(", ").ignore_then(&int).star();
//! let items = int.then(&rest, |first, rest| {
//!     std::iter::once(first).chain(rest).collect::<Result<Vec<_>, _>>()
//! });
//! let list = VoidParser::literal("[").ignore_then(&items).then_literal("]");
//!
//! assert_eq!(list.parse("[1, 2, 3]"), Ok(Ok(vec![1, 2, 3])));
//! assert!(list.parse("[1, 99999999999]").is_ok_and(|items| items.is_err()));
//! assert!(list.parse("[1,2,3]").is_err());
//! ```
//!
//! ## Modules
//!
//! - [`source`] - Character buffer, cursor, line index and spans
//! - [`grammar`] - Rule graph, recognition and the grammar listing
//! - [`memo`] - No-op and packrat memo tables
//! - [`parser`] - Typed parser combinators and the parse entry points
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod grammar;
pub mod memo;
pub mod parser;
pub mod source;

// Re-export commonly used types
pub use config::{MemoStrategy, ParseConfig};
pub use error::{CursorError, GrammarError, ParseError};
pub use grammar::{Alt, AsRule, Forward, GrammarLine, Rule, RuleAnalyzer, RuleId, RuleKind};
pub use memo::{FullMemo, Memo, MemoEntry, MemoStats, MemoTable, NoMemo};
pub use parser::{parse, Parser, VoidParser};
pub use source::{Cursor, LineCol, Located, Location};
