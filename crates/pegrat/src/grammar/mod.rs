//! # Rule Graph
//!
//! Recognition-only grammar nodes. A [`Rule`] answers one question: does it
//! match at the cursor's position, and if so where does the match end? No
//! values are built here; see [`parser`](crate::parser) for that.
//!
//! ## Node kinds
//!
//! - terminals: [`Rule::literal`], [`Rule::predicate`]
//! - combinators: [`Rule::sequence`], [`Rule::choice`], [`Rule::star`],
//!   [`Rule::plus`], [`Rule::option`]
//! - lookahead: [`Rule::and`], [`Rule::not`]
//!
//! Every node gets a process-wide unique [`RuleId`] when it is built. Nodes
//! are shared by reference and may form cycles: a choice alternative can be
//! an [`Alt::lazy`] producer, typically reading a [`Forward`] slot that is
//! filled in after the choice itself was built.

mod accept;
mod analyzer;
mod lazy;
mod rule;

pub use analyzer::{GrammarLine, RuleAnalyzer};
pub use lazy::{Alt, Forward};
pub use rule::{AsRule, CharPredicate, Rule, RuleId, RuleKind};
