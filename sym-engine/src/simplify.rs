//! Best-first search for the smallest equivalent term.
//!
//! The rewrite graph is explored outward from the input term, always expanding the smallest
//! term discovered so far (by operator count). A closed set breaks the cycles that
//! bidirectional rules would otherwise spin on, and a trace map remembers how each term was
//! first reached so the winning chain of rewrites can be replayed afterwards.
//!
//! The search is total: it always returns *some* term, in the worst case the input itself.
//! Hitting an iteration or size limit is not an error: it just stops the exploration early
//! and returns the best term found up to that point.

use crate::expr::Expr;
use crate::rewrite::Expander;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

/// Bounds on how far [`simplify_with`] will explore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// The search stops once it pops a term with at least this many operator nodes. Because the
    /// queue is ordered by operator count, everything left in the frontier is at least as
    /// large.
    pub max_ops: usize,

    /// The maximum number of terms the search will expand.
    pub max_iter: usize,
}

/// The default limits are unbounded: the search only stops when it finds a term with no
/// operators at all, or when it exhausts the (usually infinite) frontier.
impl Default for Limits {
    fn default() -> Self {
        Self {
            max_ops: usize::MAX,
            max_iter: usize::MAX,
        }
    }
}

/// The result of a simplification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simplified {
    /// The smallest term found.
    pub expr: Expr,

    /// The chain of rewrites that produced it, starting with the input term and ending with
    /// [`expr`](Self::expr). Each term is reachable from its predecessor in one rewrite step.
    pub steps: Vec<Expr>,
}

/// Searches for the smallest term equivalent to `expr`, with no bounds on the exploration.
/// See [`simplify_with`].
pub fn simplify(expr: &Expr) -> Expr {
    simplify_with(expr, Limits::default()).expr
}

/// Searches for the term with the fewest operator nodes among everything reachable from `expr`
/// by the rewrite rules, exploring smallest-first until a zero-operator term is found or
/// `limits` stops the search.
pub fn simplify_with(expr: &Expr, limits: Limits) -> Simplified {
    let mut expander = Expander::new();
    let mut open = BinaryHeap::new();
    let mut closed = BTreeSet::new();
    let mut trace: BTreeMap<Expr, Expr> = BTreeMap::new();

    open.push(Reverse((expr.op_count(), expr.clone())));
    closed.insert(expr.clone());

    // smallest term found in the search
    let mut best = expr.clone();
    let mut best_ops = best.op_count();

    let mut iterations = 0;
    while iterations < limits.max_iter {
        let Some(Reverse((next_ops, next))) = open.pop() else {
            break;
        };
        iterations += 1;

        if next_ops < best_ops {
            best = next.clone();
            best_ops = next_ops;
        }

        // exceeded maximum complexity
        if next_ops >= limits.max_ops {
            break;
        }
        // can't get any simpler than zero
        if next_ops == 0 {
            break;
        }

        for neighbor in expander.expand(&next) {
            if !closed.contains(&neighbor) {
                closed.insert(neighbor.clone());
                trace.insert(neighbor.clone(), next.clone());
                open.push(Reverse((neighbor.op_count(), neighbor)));
            }
        }
    }

    // replay the parent chain from the best term back to the input
    let mut steps = vec![best.clone()];
    let mut current = &best;
    while let Some(parent) = trace.get(current) {
        steps.push(parent.clone());
        current = parent;
    }
    steps.reverse();

    Simplified { expr: best, steps }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse_expr(input: &str) -> Expr {
        let ast = sym_parser::Parser::new(input)
            .try_parse_full::<sym_parser::parser::ast::Expr>()
            .unwrap();
        Expr::from(ast)
    }

    /// Runs the search with the same limits the REPL uses.
    fn run(input: &str) -> Simplified {
        simplify_with(&parse_expr(input), Limits { max_ops: 32, max_iter: 256 })
    }

    /// Checks that the traceback is well-formed: it starts at the input, ends at the result,
    /// and every step is a single rewrite away from its predecessor.
    fn assert_traceback(input: &str, result: &Simplified) {
        assert_eq!(result.steps.first(), Some(&parse_expr(input)));
        assert_eq!(result.steps.last(), Some(&result.expr));

        let mut expander = Expander::new();
        for pair in result.steps.windows(2) {
            assert!(
                expander.expand(&pair[0]).contains(&pair[1]),
                "`{}` is not one rewrite away from `{}`",
                pair[1],
                pair[0],
            );
        }
    }

    #[test]
    fn additive_identity() {
        let result = run("x + 0");
        assert_eq!(result.expr, parse_expr("x"));
        assert_traceback("x + 0", &result);
    }

    #[test]
    fn identities_and_kernel() {
        let result = run("x * 1 + 0 * y");
        assert_eq!(result.expr, parse_expr("x"));
        assert_traceback("x * 1 + 0 * y", &result);
    }

    #[test]
    fn pythagorean_identity() {
        let result = run("sin(x)^2 + cos(x)^2");
        assert_eq!(result.expr, parse_expr("1"));
        assert_traceback("sin(x)^2 + cos(x)^2", &result);
    }

    #[test]
    fn log_of_product_is_already_minimal() {
        // `log(x*y, b)` expands to `log(x, b) + log(y, b)`, but that has more operators, so the
        // input itself is the best this search can do
        let result = run("log(x*y, b)");
        assert_eq!(result.expr, parse_expr("log(x*y, b)"));
        assert_eq!(result.steps, vec![parse_expr("log(x*y, b)")]);
    }

    #[test]
    fn power_rule() {
        let result = run("d/dx(x^2)");
        assert_eq!(result.expr.op_count(), 1);
        assert!(
            result.expr == parse_expr("2x") || result.expr == parse_expr("x * 2"),
            "expected a single product, got `{}`",
            result.expr,
        );
        assert_traceback("d/dx(x^2)", &result);
    }

    #[test]
    fn additive_cancellation() {
        let result = run("(x + y) - y");
        assert_eq!(result.expr, parse_expr("x"));
        assert_traceback("(x + y) - y", &result);
    }

    #[test]
    fn zero_operator_inputs_come_straight_back() {
        let result = run("x");
        assert_eq!(result.expr, parse_expr("x"));
        assert_eq!(result.steps, vec![parse_expr("x")]);
    }

    #[test]
    fn best_never_grows() {
        // even when nothing simplifies, the result is no larger than the input
        for input in ["log(x*y, b)", "x + y", "sin(q) * cos(q)"] {
            let result = run(input);
            assert!(result.expr.op_count() <= parse_expr(input).op_count());
        }
    }

    #[test]
    fn iteration_limit_stops_the_search() {
        let result = simplify_with(
            &parse_expr("x * 1 + 0 * y"),
            Limits { max_ops: 32, max_iter: 1 },
        );

        // one iteration expands the input and nothing else, so no simplification is found
        assert_eq!(result.expr, parse_expr("x * 1 + 0 * y"));
    }
}
