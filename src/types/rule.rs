use super::predicate::Predicate;

/// An ordered sequence of guard conditions plus a consequence.
///
/// A rule matches a context when every condition, in order, evaluates to
/// `true`. A rule with no conditions matches unconditionally. The
/// consequence is opaque to the engine; it is handed back verbatim when
/// the rule matches.
///
/// Construction validates nothing beyond the shape: whether conditions
/// are satisfiable is not the engine's concern.
#[derive(Debug, Clone)]
pub struct Rule<V> {
    conditions: Vec<Predicate>,
    consequence: V,
    priority: Option<u32>,
}

impl<V> Rule<V> {
    #[must_use]
    pub fn new(conditions: impl IntoIterator<Item = Predicate>, consequence: V) -> Self {
        Self {
            conditions: conditions.into_iter().collect(),
            consequence,
            priority: None,
        }
    }

    /// Assign an explicit priority. Lower numbers are matched first;
    /// rules without an explicit priority come after prioritized ones,
    /// in insertion order.
    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// The ordered guard conditions.
    #[must_use]
    pub fn conditions(&self) -> &[Predicate] {
        &self.conditions
    }

    /// The consequence handed back when this rule matches.
    #[must_use]
    pub fn consequence(&self) -> &V {
        &self.consequence
    }

    /// The explicit priority, if one was assigned.
    #[must_use]
    pub fn priority(&self) -> Option<u32> {
        self.priority
    }

    /// Whether this rule matches every context.
    #[must_use]
    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Predicate, field};

    #[test]
    fn new_rule_has_no_priority() {
        let rule = Rule::new([Predicate::new(field("x").eq(1_i64))], "matched");
        assert_eq!(rule.conditions().len(), 1);
        assert_eq!(rule.consequence(), &"matched");
        assert_eq!(rule.priority(), None);
        assert!(!rule.is_unconditional());
    }

    #[test]
    fn with_priority() {
        let rule = Rule::new([], "always").with_priority(5);
        assert_eq!(rule.priority(), Some(5));
        assert!(rule.is_unconditional());
    }

    #[test]
    fn conditions_keep_order() {
        let c1 = Predicate::new(field("a").eq(1_i64));
        let c2 = Predicate::new(field("b").eq(2_i64));
        let rule = Rule::new([c1.clone(), c2.clone()], ());
        assert_eq!(rule.conditions()[0], c1);
        assert_eq!(rule.conditions()[1], c2);
    }
}
