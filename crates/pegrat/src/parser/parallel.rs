//! # Parallel Batch Parsing
//!
//! Rules and parsers are immutable once built (lazy alternatives resolve
//! through `OnceLock`), so one grammar can serve many parses at once. Each
//! input gets its own cursor and memo table.

use rayon::prelude::*;
use tracing::debug;

use crate::config::ParseConfig;
use crate::error::ParseError;

use super::Parser;

impl<T: Send + 'static> Parser<T> {
    /// Parse every input on the rayon thread pool with packrat memoization.
    ///
    /// Results are returned in input order.
    #[must_use]
    pub fn parse_batch<S>(&self, inputs: &[S]) -> Vec<Result<T, ParseError>>
    where
        S: AsRef<str> + Sync,
    {
        self.parse_batch_with(inputs, &ParseConfig::default())
    }

    /// [`parse_batch`](Self::parse_batch) with the given configuration.
    #[must_use]
    pub fn parse_batch_with<S>(
        &self,
        inputs: &[S],
        config: &ParseConfig,
    ) -> Vec<Result<T, ParseError>>
    where
        S: AsRef<str> + Sync,
    {
        debug!(inputs = inputs.len(), "parsing batch");
        inputs
            .par_iter()
            .map(|input| self.parse_with(input.as_ref(), config))
            .collect()
    }
}
