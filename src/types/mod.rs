mod context;
mod error;
mod expr;
mod function;
mod predicate;
mod rule;
mod trie;
mod value;

pub use context::Context;
pub use error::EvalError;
pub use expr::{CompareOp, Expr, FieldExpr, call, field, lit};
pub use function::{Function, FunctionRegistry};
pub use predicate::Predicate;
pub use rule::Rule;
pub use trie::RuleTrie;
pub use value::Value;

pub(crate) use trie::Node;
