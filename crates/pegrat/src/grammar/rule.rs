use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::error::GrammarError;
use crate::grammar::Alt;

/// Process-wide source of rule identities.
static NEXT_RULE_ID: AtomicU32 = AtomicU32::new(1);

/// Stable identity of a rule node.
///
/// Assigned once when the node is built and never reused, so structurally
/// identical rules stay distinct memo keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleId(u32);

impl RuleId {
    fn next() -> Self {
        Self(NEXT_RULE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind tag of a rule node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleKind {
    Literal,
    Predicate,
    Sequence,
    Choice,
    Star,
    Plus,
    Option,
    And,
    Not,
}

impl RuleKind {
    /// Literal and predicate rules match characters directly.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Literal | Self::Predicate)
    }

    /// Repetition, option and lookahead wrap exactly one child.
    #[must_use]
    pub const fn is_unary(self) -> bool {
        matches!(
            self,
            Self::Star | Self::Plus | Self::Option | Self::And | Self::Not
        )
    }
}

/// Test applied to a single character by a predicate rule.
pub type CharPredicate = Arc<dyn Fn(char) -> bool + Send + Sync>;

pub(crate) enum RuleBody {
    Literal(CompactString),
    Predicate {
        test: CharPredicate,
        description: CompactString,
    },
    /// Already flattened: no child is itself a sequence
    Sequence(SmallVec<[Rule; 4]>),
    Choice(SmallVec<[Alt<Rule>; 4]>),
    Star(Rule),
    Plus(Rule),
    Option(Rule),
    And(Rule),
    Not(Rule),
}

pub(crate) struct RuleNode {
    pub(crate) id: RuleId,
    pub(crate) body: RuleBody,
}

/// A recognition-only grammar node.
///
/// Cloning a `Rule` shares the node; equality and hashing go by [`RuleId`].
/// Rules are immutable once built (lazy choice alternatives resolve once and
/// then stay fixed) and may be used by any number of parses at the same time.
#[derive(Clone)]
pub struct Rule(Arc<RuleNode>);

impl Rule {
    fn from_body(body: RuleBody) -> Self {
        Self(Arc::new(RuleNode {
            id: RuleId::next(),
            body,
        }))
    }

    /// Match `text` exactly.
    #[must_use]
    pub fn literal(text: impl Into<CompactString>) -> Self {
        Self::from_body(RuleBody::Literal(text.into()))
    }

    /// Match one character satisfying `test`.
    ///
    /// `description` is only used when rendering the grammar.
    #[must_use]
    pub fn predicate<F>(description: impl Into<CompactString>, test: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        Self::from_body(RuleBody::Predicate {
            test: Arc::new(test),
            description: description.into(),
        })
    }

    /// Match every rule in order.
    ///
    /// Nested sequences are absorbed, so `sequence([a, sequence([b, c])])`
    /// has the three children `a b c`.
    ///
    /// # Errors
    ///
    /// [`GrammarError::EmptySequence`] if `rules` is empty.
    pub fn sequence<I>(rules: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut children = SmallVec::new();
        for rule in rules {
            match &rule.0.body {
                RuleBody::Sequence(nested) => children.extend(nested.iter().cloned()),
                _ => children.push(rule),
            }
        }
        if children.is_empty() {
            return Err(GrammarError::EmptySequence);
        }
        Ok(Self::from_body(RuleBody::Sequence(children)))
    }

    /// `self` followed by `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        let mut children: SmallVec<[Self; 4]> = SmallVec::new();
        for rule in [self, next] {
            match &rule.0.body {
                RuleBody::Sequence(nested) => children.extend(nested.iter().cloned()),
                _ => children.push(rule.clone()),
            }
        }
        Self::from_body(RuleBody::Sequence(children))
    }

    /// Ordered choice: the first alternative that matches wins.
    ///
    /// # Errors
    ///
    /// [`GrammarError::EmptyChoice`] if there are no alternatives.
    pub fn choice<I>(alternatives: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator,
        I::Item: Into<Alt<Self>>,
    {
        let alternatives: SmallVec<[Alt<Self>; 4]> =
            alternatives.into_iter().map(Into::into).collect();
        if alternatives.is_empty() {
            return Err(GrammarError::EmptyChoice);
        }
        Ok(Self::from_body(RuleBody::Choice(alternatives)))
    }

    /// A one-alternative choice, used to refer to a rule through a lazy binding.
    pub(crate) fn deferred(alternative: Alt<Self>) -> Self {
        Self::from_body(RuleBody::Choice(smallvec::smallvec![alternative]))
    }

    /// Zero or more repetitions.
    ///
    /// A child that can succeed without consuming input repeats forever; such
    /// grammars are not supported.
    #[must_use]
    pub fn star(&self) -> Self {
        Self::from_body(RuleBody::Star(self.clone()))
    }

    /// One or more repetitions.
    #[must_use]
    pub fn plus(&self) -> Self {
        Self::from_body(RuleBody::Plus(self.clone()))
    }

    /// Zero or one occurrence.
    #[must_use]
    pub fn option(&self) -> Self {
        Self::from_body(RuleBody::Option(self.clone()))
    }

    /// Positive lookahead: succeeds where `self` matches, consuming nothing.
    #[must_use]
    pub fn and(&self) -> Self {
        Self::from_body(RuleBody::And(self.clone()))
    }

    /// Negative lookahead: succeeds where `self` does not match, consuming nothing.
    #[must_use]
    pub fn not(&self) -> Self {
        Self::from_body(RuleBody::Not(self.clone()))
    }

    #[must_use]
    pub fn id(&self) -> RuleId {
        self.0.id
    }

    #[must_use]
    pub fn kind(&self) -> RuleKind {
        match &self.0.body {
            RuleBody::Literal(_) => RuleKind::Literal,
            RuleBody::Predicate { .. } => RuleKind::Predicate,
            RuleBody::Sequence(_) => RuleKind::Sequence,
            RuleBody::Choice(_) => RuleKind::Choice,
            RuleBody::Star(_) => RuleKind::Star,
            RuleBody::Plus(_) => RuleKind::Plus,
            RuleBody::Option(_) => RuleKind::Option,
            RuleBody::And(_) => RuleKind::And,
            RuleBody::Not(_) => RuleKind::Not,
        }
    }

    /// Direct children in order. Resolves lazy choice alternatives.
    #[must_use]
    pub fn children(&self) -> SmallVec<[Self; 4]> {
        match &self.0.body {
            RuleBody::Literal(_) | RuleBody::Predicate { .. } => SmallVec::new(),
            RuleBody::Sequence(rules) => rules.clone(),
            RuleBody::Choice(alternatives) => {
                alternatives.iter().map(|alt| alt.resolve().clone()).collect()
            }
            RuleBody::Star(inner)
            | RuleBody::Plus(inner)
            | RuleBody::Option(inner)
            | RuleBody::And(inner)
            | RuleBody::Not(inner) => smallvec::smallvec![inner.clone()],
        }
    }

    /// Grammar notation for a terminal: a quoted literal or the predicate's
    /// description. `None` for composite rules.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        match &self.0.body {
            RuleBody::Literal(text) => Some(format!("\"{text}\"")),
            RuleBody::Predicate { description, .. } => Some(description.to_string()),
            _ => None,
        }
    }

    pub(crate) fn body(&self) -> &RuleBody {
        &self.0.body
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id())
            .field("kind", &self.kind())
            .finish()
    }
}

impl From<Rule> for Alt<Rule> {
    fn from(rule: Rule) -> Self {
        Self::ready(rule)
    }
}

impl From<&Rule> for Alt<Rule> {
    fn from(rule: &Rule) -> Self {
        Self::ready(rule.clone())
    }
}

/// Anything that exposes the rule it recognizes with.
pub trait AsRule {
    fn as_rule(&self) -> &Rule;
}

impl AsRule for Rule {
    fn as_rule(&self) -> &Rule {
        self
    }
}
