use crate::memo::{FullMemo, MemoTable, NoMemo};

/// Which memo table a top-level parse runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum MemoStrategy {
    /// Re-evaluate every `(rule, position)` pair each time it is reached.
    None,
    /// Packrat parsing: evaluate each pair at most once per parse.
    #[default]
    Full,
}

/// Configuration options for a top-level parse.
///
/// # Example
///
/// ```rust
/// use pegrat::{MemoStrategy, ParseConfig};
///
/// // Use default configuration (packrat memoization)
/// let config = ParseConfig::default();
/// assert_eq!(config.memoization, MemoStrategy::Full);
///
/// // Or customize it
/// let config = ParseConfig {
///     memoization: MemoStrategy::Full,
///     memo_capacity: 4096, // Pre-size the memo table for large inputs
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseConfig {
    /// Memo table used by each parse
    pub memoization: MemoStrategy,

    /// Initial capacity of a full memo table (ignored without memoization)
    pub memo_capacity: usize,
}

impl ParseConfig {
    /// Configuration that re-evaluates rules instead of memoizing them.
    #[must_use]
    pub const fn without_memoization() -> Self {
        Self {
            memoization: MemoStrategy::None,
            memo_capacity: 0,
        }
    }

    /// A fresh memo table for one parse.
    #[must_use]
    pub fn memo(&self) -> MemoTable {
        match self.memoization {
            MemoStrategy::None => MemoTable::None(NoMemo),
            MemoStrategy::Full => MemoTable::Full(FullMemo::with_capacity(self.memo_capacity)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_follows_strategy() {
        assert!(matches!(ParseConfig::default().memo(), MemoTable::Full(_)));
        assert!(matches!(
            ParseConfig::without_memoization().memo(),
            MemoTable::None(_)
        ));
        assert_eq!(ParseConfig::without_memoization().memo().stats(), None);
    }
}
