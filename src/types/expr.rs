use std::fmt;
use std::ops::Not;

use super::Value;

/// Comparison operators supported in expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Expression AST. Expressions are composed programmatically (via
/// [`field()`], [`lit()`], [`call()`] and the combinator methods) and
/// evaluated against a [`Context`](super::Context); evaluation is a pure
/// function of the expression, the context, and the function registry.
///
/// Structural equality (`PartialEq`) is what the rule trie uses to decide
/// whether two guards are mergeable.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal constant; evaluates to itself.
    Const(Value),
    /// A context field accessor; fails with `InvalidContext` when the
    /// context does not provide the path.
    Field(String),
    /// An ordered list of sub-expressions, evaluated element-wise.
    List(Vec<Expr>),
    /// Boolean negation.
    Not(Box<Expr>),
    /// Numeric negation.
    Neg(Box<Expr>),
    /// Short-circuit conjunction.
    And(Box<Expr>, Box<Expr>),
    /// Short-circuit disjunction.
    Or(Box<Expr>, Box<Expr>),
    /// Comparison of two sub-expressions.
    Compare {
        lhs: Box<Expr>,
        op: CompareOp,
        rhs: Box<Expr>,
    },
    /// Application of a named registry function to argument expressions.
    Call { function: String, args: Vec<Expr> },
}

impl Expr {
    #[must_use]
    pub fn and(self, other: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn neg(self) -> Expr {
        Expr::Neg(Box::new(self))
    }

    /// Compare this expression against another with the given operator.
    #[must_use]
    pub fn compare(self, op: CompareOp, rhs: Expr) -> Expr {
        Expr::Compare {
            lhs: Box::new(self),
            op,
            rhs: Box::new(rhs),
        }
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Neq => write!(f, "!="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(v) => write!(f, "{v}"),
            Expr::Field(path) => write!(f, "{path}"),
            Expr::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Expr::Not(inner) => write!(f, "(NOT {inner})"),
            Expr::Neg(inner) => write!(f, "(-{inner})"),
            Expr::And(a, b) => write!(f, "({a} AND {b})"),
            Expr::Or(a, b) => write!(f, "({a} OR {b})"),
            Expr::Compare { lhs, op, rhs } => write!(f, "({lhs} {op} {rhs})"),
            Expr::Call { function, args } => {
                write!(f, "{function}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Intermediate builder for field comparison expressions.
/// Created by [`field()`]; a comparison method turns it into an [`Expr`],
/// or convert it directly for use as a function argument.
#[derive(Debug, Clone)]
pub struct FieldExpr {
    path: String,
}

impl FieldExpr {
    fn cmp(self, op: CompareOp, value: impl Into<Value>) -> Expr {
        Expr::Compare {
            lhs: Box::new(Expr::Field(self.path)),
            op,
            rhs: Box::new(Expr::Const(value.into())),
        }
    }

    #[must_use]
    pub fn eq(self, value: impl Into<Value>) -> Expr {
        self.cmp(CompareOp::Eq, value)
    }

    #[must_use]
    pub fn neq(self, value: impl Into<Value>) -> Expr {
        self.cmp(CompareOp::Neq, value)
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Value>) -> Expr {
        self.cmp(CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(self, value: impl Into<Value>) -> Expr {
        self.cmp(CompareOp::Gte, value)
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Value>) -> Expr {
        self.cmp(CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(self, value: impl Into<Value>) -> Expr {
        self.cmp(CompareOp::Lte, value)
    }
}

impl From<FieldExpr> for Expr {
    fn from(f: FieldExpr) -> Expr {
        Expr::Field(f.path)
    }
}

/// Start a field-accessor expression for the given dot-separated path.
#[must_use]
pub fn field(path: &str) -> FieldExpr {
    FieldExpr {
        path: path.to_owned(),
    }
}

/// A literal constant expression.
#[must_use]
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Const(value.into())
}

/// Apply a named registry function to the given argument expressions.
#[must_use]
pub fn call(function: &str, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Call {
        function: function.to_owned(),
        args: args.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_gte_builds_compare() {
        let expr = field("user.age").gte(18_i64);
        assert_eq!(
            expr,
            Expr::Compare {
                lhs: Box::new(Expr::Field("user.age".to_owned())),
                op: CompareOp::Gte,
                rhs: Box::new(Expr::Const(Value::Int(18))),
            }
        );
    }

    #[test]
    fn field_eq_str() {
        let expr = field("status").eq("active");
        match expr {
            Expr::Compare { op, rhs, .. } => {
                assert_eq!(op, CompareOp::Eq);
                assert_eq!(*rhs, Expr::Const(Value::String("active".to_owned())));
            }
            other => panic!("expected Compare, got {other:?}"),
        }
    }

    #[test]
    fn all_compare_ops() {
        let cases = vec![
            (field("f").eq(1_i64), CompareOp::Eq),
            (field("f").neq(1_i64), CompareOp::Neq),
            (field("f").gt(1_i64), CompareOp::Gt),
            (field("f").gte(1_i64), CompareOp::Gte),
            (field("f").lt(1_i64), CompareOp::Lt),
            (field("f").lte(1_i64), CompareOp::Lte),
        ];
        for (expr, expected_op) in cases {
            match expr {
                Expr::Compare { op, .. } => assert_eq!(op, expected_op),
                other => panic!("expected Compare, got {other:?}"),
            }
        }
    }

    #[test]
    fn and_chaining_is_left_associative() {
        let expr = field("a").eq(1_i64).and(field("b").eq(2_i64)).and(lit(true));
        match expr {
            Expr::And(left, right) => {
                assert_eq!(*right, Expr::Const(Value::Bool(true)));
                assert!(matches!(*left, Expr::And(_, _)));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn not_via_operator() {
        let expr = !field("banned").eq(true);
        assert!(matches!(expr, Expr::Not(_)));
    }

    #[test]
    fn call_collects_args() {
        let expr = call("min", [field("a").into(), lit(10_i64)]);
        match expr {
            Expr::Call { function, args } => {
                assert_eq!(function, "min");
                assert_eq!(args.len(), 2);
                assert_eq!(args[0], Expr::Field("a".to_owned()));
            }
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn structural_equality_for_identical_trees() {
        let a = field("user.age").gte(18_i64);
        let b = field("user.age").gte(18_i64);
        assert_eq!(a, b);
        let c = field("user.age").gte(65_i64);
        assert_ne!(a, c);
    }

    #[test]
    fn display() {
        let expr = field("age").gte(18_i64).and(!field("banned").eq(true));
        assert_eq!(
            expr.to_string(),
            "((age >= 18) AND (NOT (banned == true)))"
        );
        let c = call("max", [lit(1_i64), lit(2_i64)]);
        assert_eq!(c.to_string(), "max(1, 2)");
        let l = Expr::List(vec![lit(1_i64), lit(2_i64)]);
        assert_eq!(l.to_string(), "[1, 2]");
    }
}
