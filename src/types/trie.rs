use std::fmt;

use super::context::Context;
use super::error::EvalError;
use super::function::FunctionRegistry;
use super::predicate::Predicate;
use super::rule::Rule;

/// A trie node: one guard predicate, the rules whose condition list ends
/// exactly here, and the children reachable after the guard succeeds.
/// Children are kept in first-insertion order and never re-sorted, so
/// traversal order is deterministic for a fixed insertion sequence.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) guard: Predicate,
    pub(crate) matched: Vec<usize>,
    pub(crate) children: Vec<Node>,
}

impl Node {
    pub(crate) fn new(guard: Predicate) -> Self {
        Self {
            guard,
            matched: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// An immutable rule index built from a collection of [`Rule`]s.
///
/// Rules sharing an identical, order-preserving prefix of conditions are
/// merged into shared path segments, so one traversal evaluates each
/// distinct leading condition once per context no matter how many rules
/// share it. Guards are merged on structural equality of their
/// expression trees.
///
/// Once built, the trie is immutable; it can live behind an `Arc` and
/// serve concurrent [`matches()`](Self::matches) calls on independent
/// contexts without locking.
#[derive(Debug)]
pub struct RuleTrie<V> {
    pub(crate) rules: Vec<Rule<V>>,
    /// Rules with an empty condition list; they match every context.
    pub(crate) unconditional: Vec<usize>,
    /// Children of the guard-less root.
    pub(crate) roots: Vec<Node>,
}

impl<V> RuleTrie<V> {
    /// Build a trie from the given rules. Insertion order is the
    /// tie-breaking order at match time for rules without an explicit
    /// priority. An empty rule collection yields a valid trie that
    /// matches nothing.
    #[must_use]
    pub fn build(rules: Vec<Rule<V>>) -> Self {
        let (unconditional, roots) = crate::index::build(&rules);
        Self {
            rules,
            unconditional,
            roots,
        }
    }

    /// Match a context against every indexed rule in one traversal.
    ///
    /// Returns the rules whose full condition path is satisfied, ordered
    /// by explicit priority (ascending, unprioritized rules last) and
    /// then insertion order. A guard evaluating to `false` prunes its
    /// entire subtree; a guard evaluation failure aborts the match.
    ///
    /// # Errors
    ///
    /// Returns the first [`EvalError`] raised by a guard, unchanged. A
    /// context shape mismatch is surfaced as
    /// [`EvalError::InvalidContext`], never treated as a non-match.
    pub fn matches<'a>(
        &'a self,
        ctx: &Context,
        functions: &FunctionRegistry,
    ) -> Result<Vec<&'a Rule<V>>, EvalError> {
        crate::evaluate::matches(self, ctx, functions)
    }

    /// Convenience for first-match use sites: the highest-precedence
    /// matching rule, or `None` when nothing matches.
    ///
    /// # Errors
    ///
    /// Same contract as [`matches()`](Self::matches).
    pub fn first_match<'a>(
        &'a self,
        ctx: &Context,
        functions: &FunctionRegistry,
    ) -> Result<Option<&'a Rule<V>>, EvalError> {
        Ok(self.matches(ctx, functions)?.into_iter().next())
    }

    /// All indexed rules, in insertion order.
    #[must_use]
    pub fn rules(&self) -> &[Rule<V>] {
        &self.rules
    }

    /// The number of indexed rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the trie indexes no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The number of guard nodes in the trie. With heavy prefix sharing
    /// this is well below the total condition count across rules.
    #[must_use]
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }
}

impl<V> fmt::Display for RuleTrie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RuleTrie({} rules, {} nodes)",
            self.rules.len(),
            self.node_count(),
        )
    }
}
