use std::collections::HashMap;
use std::fmt;

use super::error::EvalError;
use super::value::Value;

type FunctionBody = Box<dyn Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync>;

/// A named, arity-fixed computation over evaluated argument values,
/// invocable from expressions via [`call()`](crate::call).
///
/// Functions are supplied by the host through a [`FunctionRegistry`];
/// they must be pure for evaluation to stay deterministic.
pub struct Function {
    arity: usize,
    body: FunctionBody,
}

impl Function {
    pub fn new(
        arity: usize,
        body: impl Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            arity,
            body: Box::new(body),
        }
    }

    /// The fixed number of arguments this function accepts.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub(crate) fn invoke(&self, name: &str, args: &[Value]) -> Result<Value, EvalError> {
        if args.len() != self.arity {
            return Err(EvalError::Arity {
                function: name.to_owned(),
                expected: self.arity,
                found: args.len(),
            });
        }
        (self.body)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Registry of named functions available to expressions during evaluation.
///
/// Shared read-only across match calls; `Send + Sync`, so one registry can
/// serve concurrently evaluating threads.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Function>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with the built-in helpers:
    /// `abs`, `min`, `max`, `len`, `contains`, `starts_with`, `ends_with`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("abs", 1, builtin_abs);
        registry.register("min", 2, |args| builtin_min_max(args, true));
        registry.register("max", 2, |args| builtin_min_max(args, false));
        registry.register("len", 1, builtin_len);
        registry.register("contains", 2, builtin_contains);
        registry.register("starts_with", 2, |args| builtin_affix(args, true));
        registry.register("ends_with", 2, |args| builtin_affix(args, false));
        registry
    }

    /// Register a function under the given name, replacing any existing
    /// function with that name.
    pub fn register(
        &mut self,
        name: &str,
        arity: usize,
        body: impl Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    ) {
        self.functions
            .insert(name.to_owned(), Function::new(arity, body));
    }

    /// Look up a function by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// The number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the registry has no functions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

fn builtin_abs(args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Int(v) => Ok(Value::Int(v.abs())),
        Value::Float(v) => Ok(Value::Float(v.abs())),
        other => Err(EvalError::type_mismatch("int or float", other.type_name())),
    }
}

#[allow(clippy::cast_precision_loss)]
fn builtin_min_max(args: &[Value], min: bool) -> Result<Value, EvalError> {
    match (&args[0], &args[1]) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(if min { *a.min(b) } else { *a.max(b) })),
        (a, b) => {
            let (x, y) = (as_f64(a)?, as_f64(b)?);
            Ok(Value::Float(if min { x.min(y) } else { x.max(y) }))
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(v: &Value) -> Result<f64, EvalError> {
    match v {
        Value::Int(v) => Ok(*v as f64),
        Value::Float(v) => Ok(*v),
        other => Err(EvalError::type_mismatch("int or float", other.type_name())),
    }
}

#[allow(clippy::cast_possible_wrap)]
fn builtin_len(args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::String(s) => Ok(Value::Int(s.chars().count() as i64)),
        Value::List(items) => Ok(Value::Int(items.len() as i64)),
        other => Err(EvalError::type_mismatch("string or list", other.type_name())),
    }
}

fn builtin_contains(args: &[Value]) -> Result<Value, EvalError> {
    match (&args[0], &args[1]) {
        (Value::String(haystack), Value::String(needle)) => {
            Ok(Value::Bool(haystack.contains(needle.as_str())))
        }
        (Value::List(items), needle) => Ok(Value::Bool(items.contains(needle))),
        (other, _) => Err(EvalError::type_mismatch("string or list", other.type_name())),
    }
}

fn builtin_affix(args: &[Value], prefix: bool) -> Result<Value, EvalError> {
    match (&args[0], &args[1]) {
        (Value::String(s), Value::String(affix)) => Ok(Value::Bool(if prefix {
            s.starts_with(affix.as_str())
        } else {
            s.ends_with(affix.as_str())
        })),
        (a, b) => Err(EvalError::type_mismatch(
            "two strings",
            format!("{} and {}", a.type_name(), b.type_name()),
        )),
    }
}
