//! Deferred references for self-referential grammars
//!
//! Ordered-choice alternatives may be *lazy*: a producer that is run the
//! first time the alternative is needed, after which the produced value is
//! cached on the alternative itself. Combined with [`Forward`], this lets a
//! rule refer to itself or to a sibling that is built later.

use std::fmt;
use std::sync::{Arc, OnceLock};

use compact_str::CompactString;

use crate::error::GrammarError;

type Producer<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// One alternative of an ordered choice.
pub struct Alt<T> {
    binding: Binding<T>,
}

enum Binding<T> {
    Ready(T),
    Deferred {
        produce: Producer<T>,
        resolved: OnceLock<T>,
    },
}

impl<T> Alt<T> {
    /// An alternative that is already built.
    #[must_use]
    pub const fn ready(value: T) -> Self {
        Self {
            binding: Binding::Ready(value),
        }
    }

    /// An alternative produced on first use.
    ///
    /// The producer runs at most once per alternative, so it must return the
    /// same value whenever it is called.
    #[must_use]
    pub fn lazy<F>(produce: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            binding: Binding::Deferred {
                produce: Arc::new(produce),
                resolved: OnceLock::new(),
            },
        }
    }

    /// The alternative's value, running the producer if this is the first use.
    pub fn resolve(&self) -> &T {
        match &self.binding {
            Binding::Ready(value) => value,
            Binding::Deferred { produce, resolved } => resolved.get_or_init(|| produce()),
        }
    }

    /// The value if it is available without running a producer.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        match &self.binding {
            Binding::Ready(value) => Some(value),
            Binding::Deferred { resolved, .. } => resolved.get(),
        }
    }

    #[must_use]
    pub const fn is_lazy(&self) -> bool {
        matches!(self.binding, Binding::Deferred { .. })
    }
}

impl<T: fmt::Debug> fmt::Debug for Alt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("Alt").field(value).finish(),
            None => f.write_str("Alt(<unresolved>)"),
        }
    }
}

impl<T> From<&Forward<T>> for Alt<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn from(forward: &Forward<T>) -> Self {
        let forward = forward.clone();
        Self::lazy(move || forward.resolve())
    }
}

/// A define-once slot for a grammar element that is referenced before it exists.
///
/// Clones share the same slot.
///
/// # Example
///
/// ```rust
/// use pegrat::grammar::{Alt, Forward, Rule};
///
/// // list ::= "x" list / "."
/// let list: Forward<Rule> = Forward::named("list");
/// let rule = Rule::choice([
///     Rule::literal("x").then(&Rule::choice([Alt::from(&list)]).unwrap()).into(),
///     Alt::ready(Rule::literal(".")),
/// ])
/// .unwrap();
/// list.define(rule.clone()).unwrap();
///
/// assert_eq!(rule.recognize("xxx.", &Default::default()), Some(4));
/// ```
pub struct Forward<T> {
    name: CompactString,
    slot: Arc<OnceLock<T>>,
}

impl<T> Forward<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::named(std::any::type_name::<T>())
    }

    /// A slot with a name used in error and panic messages.
    #[must_use]
    pub fn named(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            slot: Arc::new(OnceLock::new()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind the slot.
    ///
    /// # Errors
    ///
    /// [`GrammarError::AlreadyDefined`] if the slot was bound before.
    pub fn define(&self, value: T) -> Result<(), GrammarError> {
        self.slot.set(value).map_err(|_| GrammarError::AlreadyDefined {
            what: self.name.to_string(),
        })
    }

    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl<T: Clone> Forward<T> {
    /// A copy of the bound value.
    ///
    /// # Panics
    ///
    /// Panics if the slot was never defined. Lazy alternatives resolve during
    /// the first parse that reaches them, so every forward declaration must be
    /// defined before the grammar is used.
    #[must_use]
    pub fn resolve(&self) -> T {
        match self.slot.get() {
            Some(value) => value.clone(),
            None => panic!(
                "forward declaration `{}` was used before it was defined",
                self.name
            ),
        }
    }
}

impl<T> Clone for Forward<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for Forward<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Forward<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forward")
            .field("name", &self.name)
            .field("defined", &self.is_defined())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_lazy_alternative_resolves_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let alt = Alt::lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            42
        });

        assert!(alt.is_lazy());
        assert_eq!(alt.get(), None);
        assert_eq!(*alt.resolve(), 42);
        assert_eq!(*alt.resolve(), 42);
        assert_eq!(alt.get(), Some(&42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_forward_defines_once() {
        let slot: Forward<u8> = Forward::named("digit");
        let shared = slot.clone();

        assert!(!slot.is_defined());
        slot.define(7).unwrap();
        assert_eq!(shared.resolve(), 7);
        assert_eq!(
            shared.define(8),
            Err(GrammarError::AlreadyDefined {
                what: "digit".to_string()
            })
        );
    }

    #[test]
    fn test_alternative_from_forward_sees_later_definition() {
        let slot: Forward<&'static str> = Forward::new();
        let alt = Alt::from(&slot);
        slot.define("late").unwrap();

        assert_eq!(*alt.resolve(), "late");
    }

    #[test]
    #[should_panic(expected = "`exp` was used before it was defined")]
    fn test_undefined_forward_panics_on_resolve() {
        let slot: Forward<u8> = Forward::named("exp");
        let _ = slot.resolve();
    }
}
