//! Pegrat Tools - Command-line utilities for pegrat grammars
//!
//! Lists and runs the bundled sample grammars.

pub mod cli;
pub mod grammars;
pub mod report;

pub use grammars::{GrammarChoice, Sample};
