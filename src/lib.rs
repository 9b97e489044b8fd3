//! A rule-matching engine built on a shared-prefix trie.
//!
//! Rules are ordered sequences of boolean [`Predicate`]s plus a
//! consequence. [`RuleTrie::build`] merges rules with structurally equal
//! leading conditions into shared path segments, so matching a context
//! against the whole rule set evaluates each distinct leading condition
//! once instead of once per rule.
//!
//! ```
//! use ruletrie::{FunctionRegistry, Context, Predicate, Rule, RuleTrie, field};
//!
//! let adult = Predicate::new(field("age").gte(18_i64));
//! let senior = Predicate::new(field("age").gte(65_i64));
//!
//! let trie = RuleTrie::build(vec![
//!     Rule::new([adult.clone()], "adult"),
//!     Rule::new([adult, senior], "senior"),
//! ]);
//!
//! let functions = FunctionRegistry::with_builtins();
//! let ctx = Context::new().set("age", 70_i64);
//! let hits = trie.matches(&ctx, &functions).unwrap();
//! let labels: Vec<_> = hits.iter().map(|r| *r.consequence()).collect();
//! assert_eq!(labels, ["adult", "senior"]);
//! ```

mod evaluate;
mod index;
mod types;

pub use types::{
    CompareOp, Context, EvalError, Expr, FieldExpr, Function, FunctionRegistry, Predicate, Rule,
    RuleTrie, Value, call, field, lit,
};
