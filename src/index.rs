use crate::types::Node;
use crate::{Predicate, Rule};

/// Build the trie node structure from a rule slice.
///
/// Rules are inserted one at a time: each condition in order either
/// descends into an existing child whose guard is structurally equal, or
/// creates a new child appended after its siblings. Returns the indices
/// of unconditional rules and the children of the guard-less root.
pub(crate) fn build<V>(rules: &[Rule<V>]) -> (Vec<usize>, Vec<Node>) {
    let mut unconditional = Vec::new();
    let mut roots = Vec::new();

    for (index, rule) in rules.iter().enumerate() {
        if rule.is_unconditional() {
            unconditional.push(index);
        } else {
            insert(&mut roots, rule.conditions(), index);
        }
    }

    (unconditional, roots)
}

fn insert(siblings: &mut Vec<Node>, conditions: &[Predicate], rule_index: usize) {
    let mut current = siblings;
    for (depth, guard) in conditions.iter().enumerate() {
        let pos = match current.iter().position(|node| node.guard == *guard) {
            Some(pos) => pos,
            None => {
                current.push(Node::new(guard.clone()));
                current.len() - 1
            }
        };
        if depth + 1 == conditions.len() {
            current[pos].matched.push(rule_index);
            return;
        }
        current = &mut current[pos].children;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field;

    fn pred(path: &str, v: i64) -> Predicate {
        Predicate::new(field(path).eq(v))
    }

    #[test]
    fn rules_with_no_shared_prefix_become_separate_roots() {
        let rules = vec![
            Rule::new([pred("a", 1)], "a"),
            Rule::new([pred("b", 2)], "b"),
        ];
        let (unconditional, roots) = build(&rules);
        assert!(unconditional.is_empty());
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].matched, vec![0]);
        assert_eq!(roots[1].matched, vec![1]);
    }

    #[test]
    fn full_prefix_rule_attaches_at_interior_node() {
        // [p] and [p, q]: the shorter rule sits on the interior node.
        let p = pred("a", 1);
        let q = pred("b", 2);
        let rules = vec![
            Rule::new([p.clone(), q], "long"),
            Rule::new([p], "short"),
        ];
        let (_, roots) = build(&rules);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].matched, vec![1]);
        assert_eq!(roots[0].children[0].matched, vec![0]);
    }

    #[test]
    fn sibling_order_is_first_insertion_order() {
        let shared = pred("root", 0);
        let rules = vec![
            Rule::new([shared.clone(), pred("x", 1)], 0),
            Rule::new([shared.clone(), pred("y", 2)], 1),
            // Re-inserting under the x branch must not reorder siblings.
            Rule::new([shared, pred("x", 1), pred("z", 3)], 2),
        ];
        let (_, roots) = build(&rules);
        let children = &roots[0].children;
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].matched, vec![0]);
        assert_eq!(children[1].matched, vec![1]);
        assert_eq!(children[0].children[0].matched, vec![2]);
    }

    #[test]
    fn diverging_at_third_condition_shares_two_levels() {
        let p1 = pred("a", 1);
        let p2 = pred("b", 2);
        let rules = vec![
            Rule::new([p1.clone(), p2.clone(), pred("c", 3)], "r1"),
            Rule::new([p1, p2, pred("d", 4)], "r2"),
        ];
        let (_, roots) = build(&rules);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].children.len(), 1);
        assert_eq!(roots[0].children[0].children.len(), 2);
    }
}
