//! # Memo Tables
//!
//! A memo table records, per `(rule, start position)`, whether the rule was
//! already evaluated there and with what outcome. Recognition consults it
//! before doing any work:
//!
//! - [`FullMemo`] stores every outcome (packrat parsing), so each pair is
//!   evaluated at most once per parse.
//! - [`NoMemo`] stores nothing and always answers [`MemoEntry::Unknown`].
//!
//! Both yield identical accept/reject outcomes for any grammar; only the
//! amount of repeated work differs. A table is created per top-level parse
//! and must not be shared between parses.

use hashbrown::HashMap;

use crate::grammar::RuleId;

/// What a memo table knows about one `(rule, position)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoEntry {
    /// Not evaluated yet, or the table chose not to remember.
    Unknown,
    /// The rule rejected at this position.
    Rejected,
    /// The rule accepted at this position, ending at the given position.
    Accepted(usize),
}

/// Storage for recognition outcomes.
///
/// Implementations may forget (answer `Unknown` for a recorded pair) but
/// must never answer with an outcome that differs from the recorded one.
pub trait Memo {
    fn lookup(&mut self, rule: RuleId, start: usize) -> MemoEntry;

    fn record_accept(&mut self, rule: RuleId, start: usize, end: usize);

    fn record_reject(&mut self, rule: RuleId, start: usize);
}

/// Memo table that never remembers anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMemo;

impl Memo for NoMemo {
    fn lookup(&mut self, _rule: RuleId, _start: usize) -> MemoEntry {
        MemoEntry::Unknown
    }

    fn record_accept(&mut self, _rule: RuleId, _start: usize, _end: usize) {}

    fn record_reject(&mut self, _rule: RuleId, _start: usize) {}
}

/// Key for memo entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MemoKey {
    rule: RuleId,
    start: usize,
}

/// Counters describing how a [`FullMemo`] was used during one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoStats {
    /// Number of lookups performed
    pub lookups: usize,
    /// Lookups answered from the table
    pub hits: usize,
    /// Outcomes stored (equals the number of real rule evaluations)
    pub entries: usize,
}

/// Packrat memo table: remembers every outcome for the lifetime of one parse.
#[derive(Debug)]
pub struct FullMemo {
    table: HashMap<MemoKey, MemoEntry, ahash::RandomState>,
    stats: MemoStats,
}

impl FullMemo {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: HashMap::with_capacity_and_hasher(capacity, ahash::RandomState::new()),
            stats: MemoStats::default(),
        }
    }

    #[must_use]
    pub const fn stats(&self) -> MemoStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn store(&mut self, key: MemoKey, entry: MemoEntry) {
        // Outcomes are final within a parse; the first one recorded wins.
        if let hashbrown::hash_map::Entry::Vacant(slot) = self.table.entry(key) {
            slot.insert(entry);
            self.stats.entries += 1;
        }
    }
}

impl Default for FullMemo {
    fn default() -> Self {
        Self::new()
    }
}

impl Memo for FullMemo {
    fn lookup(&mut self, rule: RuleId, start: usize) -> MemoEntry {
        self.stats.lookups += 1;
        match self.table.get(&MemoKey { rule, start }) {
            Some(&entry) => {
                self.stats.hits += 1;
                entry
            }
            None => MemoEntry::Unknown,
        }
    }

    fn record_accept(&mut self, rule: RuleId, start: usize, end: usize) {
        self.store(MemoKey { rule, start }, MemoEntry::Accepted(end));
    }

    fn record_reject(&mut self, rule: RuleId, start: usize) {
        self.store(MemoKey { rule, start }, MemoEntry::Rejected);
    }
}

/// The memo table of one top-level parse, as selected by [`ParseConfig`](crate::ParseConfig).
#[derive(Debug)]
pub enum MemoTable {
    None(NoMemo),
    Full(FullMemo),
}

impl MemoTable {
    /// Usage counters, if this table keeps any.
    #[must_use]
    pub const fn stats(&self) -> Option<MemoStats> {
        match self {
            Self::None(_) => None,
            Self::Full(memo) => Some(memo.stats()),
        }
    }
}

impl Memo for MemoTable {
    fn lookup(&mut self, rule: RuleId, start: usize) -> MemoEntry {
        match self {
            Self::None(memo) => memo.lookup(rule, start),
            Self::Full(memo) => memo.lookup(rule, start),
        }
    }

    fn record_accept(&mut self, rule: RuleId, start: usize, end: usize) {
        match self {
            Self::None(memo) => memo.record_accept(rule, start, end),
            Self::Full(memo) => memo.record_accept(rule, start, end),
        }
    }

    fn record_reject(&mut self, rule: RuleId, start: usize) {
        match self {
            Self::None(memo) => memo.record_reject(rule, start),
            Self::Full(memo) => memo.record_reject(rule, start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Rule;

    #[test]
    fn test_no_memo_forgets() {
        let rule = Rule::literal("a").id();
        let mut memo = NoMemo;

        memo.record_accept(rule, 0, 1);
        assert_eq!(memo.lookup(rule, 0), MemoEntry::Unknown);
    }

    #[test]
    fn test_full_memo_records_outcomes() {
        let a = Rule::literal("a").id();
        let b = Rule::literal("b").id();
        let mut memo = FullMemo::new();

        assert_eq!(memo.lookup(a, 0), MemoEntry::Unknown);
        memo.record_accept(a, 0, 1);
        memo.record_reject(b, 0);

        assert_eq!(memo.lookup(a, 0), MemoEntry::Accepted(1));
        assert_eq!(memo.lookup(b, 0), MemoEntry::Rejected);
        assert_eq!(memo.lookup(a, 1), MemoEntry::Unknown);
        assert_eq!(
            memo.stats(),
            MemoStats {
                lookups: 4,
                hits: 2,
                entries: 2
            }
        );
    }

    #[test]
    fn test_full_memo_entries_are_final() {
        let a = Rule::literal("a").id();
        let mut memo = FullMemo::with_capacity(8);

        memo.record_accept(a, 0, 1);
        memo.record_reject(a, 0);
        memo.record_accept(a, 0, 5);

        assert_eq!(memo.lookup(a, 0), MemoEntry::Accepted(1));
        assert_eq!(memo.len(), 1);
    }
}
