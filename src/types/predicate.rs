use std::fmt;
use std::sync::Arc;

use super::expr::Expr;

/// A boolean-valued [`Expr`] behind shared ownership, used as a rule
/// condition and as a trie guard.
///
/// Predicates are cheap to clone (`Arc`), so the same predicate can be
/// shared across many rules; the trie merges rules whose leading
/// conditions are equal. Equality is an `Arc` pointer check first, then
/// structural equality on the expression tree. Semantic equivalence
/// (e.g. `age >= 18` vs `NOT (age < 18)`) is never considered.
#[derive(Debug, Clone)]
pub struct Predicate(Arc<Expr>);

impl Predicate {
    #[must_use]
    pub fn new(expr: Expr) -> Self {
        Self(Arc::new(expr))
    }

    /// The underlying expression tree.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.0
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl From<Expr> for Predicate {
    fn from(expr: Expr) -> Self {
        Predicate::new(expr)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
