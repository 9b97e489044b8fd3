use crate::types::Node;
use crate::{Context, EvalError, Expr, FunctionRegistry, Predicate, Rule, RuleTrie, Value};

impl Expr {
    /// Evaluate this expression against a context.
    ///
    /// Evaluation is a pure function of (expression, context, registry):
    /// no hidden state, no side effects, so repeated evaluation with the
    /// same inputs yields the same value or the same error.
    ///
    /// # Errors
    ///
    /// - [`EvalError::InvalidContext`] when a field accessor's path is
    ///   absent from the context.
    /// - [`EvalError::UnknownFunction`] / [`EvalError::Arity`] for
    ///   malformed calls.
    /// - [`EvalError::TypeMismatch`] when an operator or function meets
    ///   incompatible value types.
    /// - [`EvalError::Overflow`] when integer negation overflows.
    ///
    /// Operand failures propagate unchanged; composite expressions add
    /// no context of their own.
    pub fn eval(&self, ctx: &Context, functions: &FunctionRegistry) -> Result<Value, EvalError> {
        match self {
            Expr::Const(value) => Ok(value.clone()),
            Expr::Field(path) => ctx
                .get(path)
                .cloned()
                .ok_or_else(|| EvalError::missing_field(path)),
            Expr::List(items) => items
                .iter()
                .map(|item| item.eval(ctx, functions))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Expr::Not(inner) => {
                let operand = expect_bool(inner.eval(ctx, functions)?)?;
                Ok(Value::Bool(!operand))
            }
            Expr::Neg(inner) => match inner.eval(ctx, functions)? {
                Value::Int(v) => v.checked_neg().map(Value::Int).ok_or_else(|| {
                    EvalError::Overflow {
                        operation: format!("-({v})"),
                    }
                }),
                Value::Float(v) => Ok(Value::Float(-v)),
                other => Err(EvalError::type_mismatch("int or float", other.type_name())),
            },
            Expr::And(a, b) => {
                if !expect_bool(a.eval(ctx, functions)?)? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(expect_bool(b.eval(ctx, functions)?)?))
            }
            Expr::Or(a, b) => {
                if expect_bool(a.eval(ctx, functions)?)? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(expect_bool(b.eval(ctx, functions)?)?))
            }
            Expr::Compare { lhs, op, rhs } => {
                let left = lhs.eval(ctx, functions)?;
                let right = rhs.eval(ctx, functions)?;
                left.compare(*op, &right).map(Value::Bool).ok_or_else(|| {
                    EvalError::type_mismatch(
                        "comparable values of matching types",
                        format!("{} {op} {}", left.type_name(), right.type_name()),
                    )
                })
            }
            Expr::Call { function, args } => {
                let mut evaluated = Vec::with_capacity(args.len());
                for arg in args {
                    evaluated.push(arg.eval(ctx, functions)?);
                }
                let f = functions
                    .get(function)
                    .ok_or_else(|| EvalError::UnknownFunction {
                        name: function.clone(),
                    })?;
                f.invoke(function, &evaluated)
            }
        }
    }
}

impl Predicate {
    /// Evaluate the predicate to a boolean.
    ///
    /// # Errors
    ///
    /// Propagates the underlying [`Expr::eval`] failure; a non-boolean
    /// result is [`EvalError::TypeMismatch`], never coerced.
    pub fn test(&self, ctx: &Context, functions: &FunctionRegistry) -> Result<bool, EvalError> {
        expect_bool(self.expr().eval(ctx, functions)?)
    }
}

fn expect_bool(value: Value) -> Result<bool, EvalError> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(EvalError::type_mismatch("bool", other.type_name())),
    }
}

/// Traverse the trie once for the given context, collecting every rule
/// whose full condition path is satisfied, then order the hits by
/// (explicit priority, insertion index).
pub(crate) fn matches<'a, V>(
    trie: &'a RuleTrie<V>,
    ctx: &Context,
    functions: &FunctionRegistry,
) -> Result<Vec<&'a Rule<V>>, EvalError> {
    let mut hits: Vec<usize> = trie.unconditional.clone();
    collect(&trie.roots, ctx, functions, &mut hits)?;
    hits.sort_by_key(|&i| (trie.rules[i].priority().unwrap_or(u32::MAX), i));
    Ok(hits.into_iter().map(|i| &trie.rules[i]).collect())
}

fn collect(
    siblings: &[Node],
    ctx: &Context,
    functions: &FunctionRegistry,
    hits: &mut Vec<usize>,
) -> Result<(), EvalError> {
    for node in siblings {
        // False prunes the whole subtree; an error aborts the match.
        if node.guard.test(ctx, functions)? {
            hits.extend_from_slice(&node.matched);
            collect(&node.children, ctx, functions, hits)?;
        }
    }
    Ok(())
}
