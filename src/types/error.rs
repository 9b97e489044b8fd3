use thiserror::Error;

/// Failures produced by expression evaluation and trie matching.
///
/// A guard evaluating to `false` is normal control flow, never an error;
/// every variant here indicates a caller or authoring bug and is
/// non-retryable. Errors propagate unchanged through composite
/// expressions and trie traversal to the original caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A field accessor or guard expected a context of a specific shape
    /// and the supplied context does not satisfy it.
    #[error("invalid context: expected {expected}")]
    InvalidContext { expected: String },

    /// A call named a function absent from the registry.
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    /// A function was invoked with the wrong number of arguments.
    #[error("function '{function}' expects {expected} argument(s), got {found}")]
    Arity {
        function: String,
        expected: usize,
        found: usize,
    },

    /// An operator or function was applied to incompatible value types.
    #[error("type mismatch: expected {expected}, got {found}")]
    TypeMismatch { expected: String, found: String },

    /// An arithmetic operation overflowed the value's representation.
    #[error("arithmetic overflow evaluating {operation}")]
    Overflow { operation: String },
}

impl EvalError {
    pub(crate) fn missing_field(path: &str) -> Self {
        EvalError::InvalidContext {
            expected: format!("a context providing field '{path}'"),
        }
    }

    pub(crate) fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        EvalError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
