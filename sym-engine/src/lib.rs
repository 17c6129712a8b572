//! Rewrite-based simplification of algebraic expressions.
//!
//! # Expression representation
//!
//! Expressions in this crate are represented as a tree of [`Expr`] nodes, built from the AST
//! produced by [`sym_parser`] via the [`From`] trait. Unlike the AST, [`Expr`] carries no span
//! information: two occurrences of `x + 0` convert to identical values no matter where they
//! appear in the source. This structural identity is what the whole crate is built on. It is
//! how the simplifier recognizes that a rewrite has produced a term it has already seen.
//!
//! ```
//! use sym_engine::Expr;
//! use sym_parser::parser::{ast, Parser};
//!
//! let ast = Parser::new("x + 0").try_parse_full::<ast::Expr>().unwrap();
//! let expr = Expr::from(ast);
//! assert_eq!(expr.op_count(), 1);
//! ```
//!
//! # Simplification
//!
//! [`simplify()`] searches for the expression with the fewest operator nodes among everything
//! reachable from its input by the bidirectional rewrite rules in [`rewrite::rules`]. The search
//! is best-first over the rewrite graph: a priority queue keyed by operator count, a closed set
//! so no term is explored twice, and a trace of how each term was discovered so the winning
//! chain of rewrites can be replayed.
//!
//! Because every rule applies in both directions, the search is free to temporarily *grow* an
//! expression (distributing a product to expose a cancellation, say) as long as the detour
//! eventually pays off. The [`Limits`] passed to [`simplify_with`] bound how far it will wander.
//!
//! ```
//! use sym_engine::{simplify_with, Expr, Limits};
//! use sym_parser::parser::{ast, Parser};
//!
//! let ast = Parser::new("x * 1 + 0 * y").try_parse_full::<ast::Expr>().unwrap();
//! let result = simplify_with(&Expr::from(ast), Limits { max_ops: 32, max_iter: 256 });
//!
//! assert_eq!(result.expr.to_string(), "x");
//! ```

pub mod expr;
pub mod rewrite;
pub mod simplify;

pub use expr::Expr;
pub use simplify::{simplify, simplify_with, Limits, Simplified};
