use std::collections::HashMap;

use super::Value;

/// Evaluation context mapping dot-separated field paths to [`Value`]s.
///
/// The engine imposes no shape on contexts: field-accessor expressions
/// declare the path they need and check for it at evaluation time,
/// failing with [`EvalError::InvalidContext`](super::EvalError::InvalidContext)
/// when the path is absent. A context is borrowed for the duration of a
/// single match or eval call and never mutated by the engine.
#[derive(Debug, Clone, Default)]
pub struct Context {
    fields: HashMap<String, Value>,
}

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, consuming and returning the context for chaining.
    #[must_use]
    pub fn set(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.insert(path, value.into());
        self
    }

    /// Insert a field value through a mutable reference.
    pub fn insert(&mut self, path: &str, value: Value) {
        self.fields.insert(path.to_owned(), value);
    }

    /// Look up a field value by path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.fields.get(path)
    }

    /// Whether the context provides the given field path.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.fields.contains_key(path)
    }

    /// The number of fields in the context.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the context has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<P: Into<String>, V: Into<Value>> FromIterator<(P, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(p, v)| (p.into(), v.into()))
                .collect(),
        }
    }
}
